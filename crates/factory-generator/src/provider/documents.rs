//! National identifier generators (CPF, CNPJ, SSN, EIN).

use rand::Rng;

/// Mod-11 check digit used by CPF and CNPJ.
fn mod11_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let rest = sum % 11;
    if rest < 2 {
        0
    } else {
        11 - rest
    }
}

fn join_digits(digits: &[u32]) -> String {
    digits
        .iter()
        .filter_map(|d| char::from_digit(*d, 10))
        .collect()
}

/// Brazilian individual taxpayer number, formatted `XXX.XXX.XXX-XX`.
pub fn generate_cpf<R: Rng>(rng: &mut R) -> String {
    let mut digits: Vec<u32> = (0..9).map(|_| rng.gen_range(0..10)).collect();
    let first = mod11_digit(&digits, &[10, 9, 8, 7, 6, 5, 4, 3, 2]);
    digits.push(first);
    let second = mod11_digit(&digits, &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2]);
    digits.push(second);

    let s = join_digits(&digits);
    format!("{}.{}.{}-{}", &s[0..3], &s[3..6], &s[6..9], &s[9..11])
}

/// Brazilian company number (head office), formatted `XX.XXX.XXX/0001-XX`.
pub fn generate_cnpj<R: Rng>(rng: &mut R) -> String {
    let mut digits: Vec<u32> = (0..8).map(|_| rng.gen_range(0..10)).collect();
    digits.extend([0, 0, 0, 1]);
    let first = mod11_digit(&digits, &[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
    digits.push(first);
    let second = mod11_digit(&digits, &[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
    digits.push(second);

    let s = join_digits(&digits);
    format!(
        "{}.{}.{}/{}-{}",
        &s[0..2],
        &s[2..5],
        &s[5..8],
        &s[8..12],
        &s[12..14]
    )
}

/// US social security number, formatted `AAA-GG-SSSS`.
///
/// Area 000, 666 and 900-999, group 00 and serial 0000 are never issued.
pub fn generate_ssn<R: Rng>(rng: &mut R) -> String {
    let area = loop {
        let candidate = rng.gen_range(1..=899);
        if candidate != 666 {
            break candidate;
        }
    };
    let group = rng.gen_range(1..=99);
    let serial = rng.gen_range(1..=9999);
    format!("{area:03}-{group:02}-{serial:04}")
}

const EIN_PREFIXES: &[u32] = &[
    1, 2, 3, 4, 5, 6, 10, 11, 12, 13, 14, 15, 16, 20, 21, 22, 23, 24, 25, 26, 27, 30, 31, 32, 33,
    34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 50, 51, 52, 53, 54, 55, 56, 57, 58,
    59, 60, 61, 62, 63, 64, 65, 66, 67, 68, 71, 72, 73, 74, 75, 76, 77, 80, 81, 82, 83, 84, 85,
    86, 87, 88, 90, 91, 92, 93, 94, 95, 98, 99,
];

/// US employer identification number, formatted `NN-NNNNNNN`.
pub fn generate_ein<R: Rng>(rng: &mut R) -> String {
    let prefix = EIN_PREFIXES[rng.gen_range(0..EIN_PREFIXES.len())];
    let sequence = rng.gen_range(0..10_000_000);
    format!("{prefix:02}-{sequence:07}")
}

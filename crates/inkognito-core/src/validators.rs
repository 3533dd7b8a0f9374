//! Pure checksum and format rules.
//!
//! Every function here is a stateless predicate over a matched substring.
//! A failing validator drops the candidate before it reaches the resolver;
//! validators never downgrade confidence.

/// Luhn mod-10 check for payment card numbers.
///
/// Spaces and dashes are stripped first; any other non-digit residue fails,
/// as does a digit count outside the valid card-number range (13-19).
pub fn luhn(raw: &str) -> bool {
    let mut digits: Vec<u32> = Vec::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            ' ' | '-' => continue,
            _ => match c.to_digit(10) {
                Some(d) => digits.push(d),
                None => return false,
            },
        }
    }
    if !(13..=19).contains(&digits.len()) {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// Per-country IBAN lengths for the locales the pipeline is expected to see.
/// Unknown country codes are rejected outright (cheap rejection before any
/// checksum arithmetic).
const IBAN_LENGTHS: &[(&str, usize)] = &[
    ("AT", 20),
    ("BE", 16),
    ("CH", 21),
    ("CZ", 24),
    ("DE", 22),
    ("DK", 18),
    ("ES", 24),
    ("FI", 18),
    ("FR", 27),
    ("GB", 22),
    ("IE", 22),
    ("IT", 27),
    ("LU", 20),
    ("NL", 18),
    ("NO", 15),
    ("PL", 28),
    ("PT", 25),
    ("SE", 24),
];

/// ISO 13616 Mod-97 check.
///
/// The candidate is whitespace-stripped and upper-cased, checked against the
/// country length table, rearranged (first four characters moved to the
/// end), letters expanded to their two-digit codes (A=10..Z=35) and the
/// resulting numeral reduced mod 97 in a streaming pass. Valid iff the
/// remainder is 1.
pub fn iban_mod97(raw: &str) -> bool {
    let s: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    if s.len() < 5 || !s.is_ascii() || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    if !s[..2].chars().all(|c| c.is_ascii_uppercase()) || !s[2..4].chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let Some(&(_, expected)) = IBAN_LENGTHS.iter().find(|(cc, _)| *cc == &s[..2]) else {
        return false;
    };
    if s.len() != expected {
        return false;
    }

    let mut remainder: u32 = 0;
    for c in s[4..].chars().chain(s[..4].chars()) {
        if let Some(d) = c.to_digit(10) {
            remainder = (remainder * 10 + d) % 97;
        } else {
            let v = c as u32 - 'A' as u32 + 10;
            remainder = (remainder * 100 + v) % 97;
        }
    }
    remainder == 1
}

/// Expected IBAN length for a country code, if the country is supported.
pub fn iban_expected_len(country: &str) -> Option<usize> {
    IBAN_LENGTHS
        .iter()
        .find(|(cc, _)| *cc == country)
        .map(|&(_, len)| len)
}

/// German tax identification number (Steuerliche Identifikationsnummer).
///
/// Eleven digits, leading digit non-zero, exactly one digit among the first
/// ten occurring two or three times (all others once), and an ISO 7064
/// MOD 11,10 check digit in position eleven.
pub fn steuer_id(raw: &str) -> bool {
    let digits: Vec<u32> = match raw.chars().map(|c| c.to_digit(10)).collect() {
        Some(d) => d,
        None => return false,
    };
    if digits.len() != 11 || digits[0] == 0 {
        return false;
    }

    let mut counts = [0u8; 10];
    for &d in &digits[..10] {
        counts[d as usize] += 1;
    }
    let repeats: Vec<u8> = counts.iter().copied().filter(|&c| c >= 2).collect();
    if repeats.len() != 1 || repeats[0] > 3 {
        return false;
    }

    // ISO 7064 MOD 11,10
    let mut product = 10u32;
    for &d in &digits[..10] {
        let mut sum = (d + product) % 10;
        if sum == 0 {
            sum = 10;
        }
        product = (sum * 2) % 11;
    }
    (11 - product) % 10 == digits[10]
}

/// German driving licence number.
///
/// Eleven upper-case alphanumeric characters containing at least one letter
/// and one digit; position nine is a check digit over positions one to
/// eight, weighted 9 down to 2 with letters valued A=10..Z=35, reduced
/// mod 11 ('X' encodes remainder 10).
pub fn driver_license(raw: &str) -> bool {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() != 11 {
        return false;
    }
    if !chars
        .iter()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    {
        return false;
    }
    if !chars.iter().any(|c| c.is_ascii_uppercase()) || !chars.iter().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let value = |c: char| -> u32 {
        match c.to_digit(10) {
            Some(d) => d,
            None => c as u32 - 'A' as u32 + 10,
        }
    };
    let sum: u32 = chars[..8]
        .iter()
        .zip((2..=9).rev())
        .map(|(&c, weight)| value(c) * weight)
        .sum();
    match sum % 11 {
        10 => chars[8] == 'X',
        r => chars[8].to_digit(10) == Some(r),
    }
}

/// Character set used in German passport and identity-card serials.
/// Vowels and easily confused letters are excluded by the issuing scheme.
const DOCUMENT_LETTERS: &str = "CFGHJKLMNPRTVWXYZ";

/// German passport / identity document serial: nine characters from the
/// document charset, starting with a letter, containing at least one digit.
///
/// The serial printed in free text carries no standalone check digit (the
/// MRZ check applies only to the machine-readable zone), so this is a
/// format-only rule.
pub fn passport_number(raw: &str) -> bool {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() != 9 {
        return false;
    }
    if !DOCUMENT_LETTERS.contains(chars[0]) {
        return false;
    }
    if !chars
        .iter()
        .all(|&c| c.is_ascii_digit() || DOCUMENT_LETTERS.contains(c))
    {
        return false;
    }
    chars.iter().any(|c| c.is_ascii_digit())
}

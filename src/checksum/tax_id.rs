const LENGTH: usize = 9;

const PERSONAL_CONTROL_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";
const ORGANIZATION_TYPES: &str = "ABCDEFGHJNPQRSUVW";
const ORGANIZATION_CONTROL_LETTERS: &[u8; 10] = b"JABCDEFGHI";

/// Validates a Spanish tax identifier: NIF (DNI), NIE or CIF.
pub fn validate_tax_id(code: &str) -> bool {
    let code: Vec<u8> = match code.trim().chars()
        .filter(|&c| c != '-')
        .map(|c| if c.is_ascii() { Some(c.to_ascii_uppercase() as u8) } else { None })
        .collect::<Option<_>>()
    {
        Some(code) => code,
        None => return false,
    };

    if code.len() != LENGTH {
        return false;
    }

    let (first, control) = (code[0], code[LENGTH - 1]);

    match first {
        b'X' | b'Y' | b'Z' => {
            let prefix = first - b'X';
            personal_control_letter(prefix, &code[1..LENGTH - 1]) == Some(control)
        },
        b'0'..=b'9' => personal_control_letter(0, &code[..LENGTH - 1]) == Some(control),
        _ if ORGANIZATION_TYPES.as_bytes().contains(&first) => {
            let Some(control_digit) = organization_control_digit(&code[1..LENGTH - 1]) else {
                return false;
            };

            // Organizations use either a digit or a letter as the check character depending on
            // their type. Both forms are accepted for any type.
            if control.is_ascii_digit() {
                control - b'0' == control_digit
            } else {
                control == ORGANIZATION_CONTROL_LETTERS[control_digit as usize]
            }
        },
        _ => false,
    }
}

fn personal_control_letter(prefix: u8, digits: &[u8]) -> Option<u8> {
    let mut number = u32::from(prefix);

    for &digit in digits {
        if !digit.is_ascii_digit() {
            return None;
        }
        number = number * 10 + u32::from(digit - b'0');
    }

    Some(PERSONAL_CONTROL_LETTERS[(number % 23) as usize])
}

fn organization_control_digit(digits: &[u8]) -> Option<u8> {
    let mut sum = 0;

    for (index, &digit) in digits.iter().enumerate() {
        if !digit.is_ascii_digit() {
            return None;
        }

        let digit = digit - b'0';
        sum += if index % 2 == 0 {
            let doubled = digit * 2;
            doubled / 10 + doubled % 10
        } else {
            digit
        };
    }

    Some((10 - sum % 10) % 10)
}

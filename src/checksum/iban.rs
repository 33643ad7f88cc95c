const MIN_LENGTH: usize = 15;
const MAX_LENGTH: usize = 34;

/// Validates an IBAN-shaped bank account number using ISO 7064 mod-97. Spaces and dashes are
/// ignored.
pub fn validate_bank_account(code: &str) -> bool {
    let code: Vec<char> = code.chars()
        .filter(|&c| c != ' ' && c != '-')
        .flat_map(char::to_uppercase)
        .collect();

    if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
        return false;
    }

    let (head, tail) = code.split_at(4);
    let mut remainder: u32 = 0;

    for &c in tail.iter().chain(head) {
        let value = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            _ => return false,
        };

        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }

    remainder == 1
}

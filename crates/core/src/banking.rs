//! Korean bank lookup tables and Toss transfer deep links.
//!
//! Bank names must match exactly (no fuzzy matching). Users pick bank names
//! from a fixed list in the client, and the same name may appear in its long
//! form (`KB국민은행`) or its short form (`국민은행`).

/// Bank code used when the bank name is not in [`BANK_CODES`].
pub const DEFAULT_BANK_CODE: &str = "004";

/// Scheme and host of the Toss app's send-money deep link.
const TOSS_SEND_URI: &str = "supertoss://send";

/// Korean bank name to the three-digit clearing code used by Toss.
const BANK_CODES: &[(&str, &str)] = &[
    ("KB국민은행", "004"),
    ("국민은행", "004"),
    ("신한은행", "088"),
    ("우리은행", "020"),
    ("하나은행", "081"),
    ("NH농협은행", "011"),
    ("농협은행", "011"),
    ("IBK기업은행", "003"),
    ("기업은행", "003"),
    ("SC제일은행", "023"),
    ("한국씨티은행", "027"),
    ("씨티은행", "027"),
    ("새마을금고", "045"),
    ("신협", "048"),
    ("우체국", "071"),
    ("KDB산업은행", "002"),
    ("산업은행", "002"),
    ("수협은행", "007"),
    ("대구은행", "031"),
    ("부산은행", "032"),
    ("경남은행", "039"),
    ("광주은행", "034"),
    ("전북은행", "037"),
    ("제주은행", "035"),
    ("카카오뱅크", "090"),
    ("케이뱅크", "089"),
    ("토스뱅크", "092"),
];

/// Long-form bank names that Toss displays under a shorter name.
const TOSS_BANK_NAMES: &[(&str, &str)] = &[
    ("KB국민은행", "국민은행"),
    ("NH농협은행", "농협은행"),
    ("IBK기업은행", "기업은행"),
    ("KDB산업은행", "산업은행"),
    ("한국씨티은행", "씨티은행"),
];

/// Look up the clearing code for a bank name. `None` when the name is unknown.
pub fn bank_code(bank_name: &str) -> Option<&'static str> {
    BANK_CODES
        .iter()
        .find(|(name, _)| *name == bank_name)
        .map(|(_, code)| *code)
}

/// Clearing code for a bank name, falling back to [`DEFAULT_BANK_CODE`].
pub fn bank_code_or_default(bank_name: &str) -> &'static str {
    bank_code(bank_name).unwrap_or(DEFAULT_BANK_CODE)
}

/// Normalize a bank name to the label the Toss app expects.
///
/// Unmapped names are returned unchanged.
pub fn toss_bank_name(bank_name: &str) -> &str {
    TOSS_BANK_NAMES
        .iter()
        .find(|(long, _)| *long == bank_name)
        .map(|(_, short)| *short)
        .unwrap_or(bank_name)
}

/// Strip `-` separators from an account number.
pub fn normalize_account_number(account_no: &str) -> String {
    account_no.chars().filter(|c| *c != '-').collect()
}

/// Build a `supertoss://send` deep link.
///
/// Every query value is percent-encoded as UTF-8; `account_no` has its `-`
/// separators removed first.
pub fn toss_deep_link(amount: &str, bank_code: &str, bank: &str, account_no: &str) -> String {
    format!(
        "{TOSS_SEND_URI}?amount={}&bankCode={}&bank={}&accountNo={}",
        urlencoding::encode(amount),
        urlencoding::encode(bank_code),
        urlencoding::encode(bank),
        urlencoding::encode(&normalize_account_number(account_no)),
    )
}

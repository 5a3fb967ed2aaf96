//! Field validation for user-supplied catalog input.
//!
//! Every check returns `ShelfError::Validation` with a message suitable for
//! showing to the person who typed the value.

use crate::ShelfError;
use crate::primitives::{MAX_AUTHOR_LENGTH, MAX_TITLE_LENGTH, MIN_NAME_LENGTH, PHONE_DIGITS};
use regex::Regex;
use std::sync::OnceLock;

const NAME_PATTERN: &str = r"^[a-zA-Z\s]+$";
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const PHONE_PATTERN: &str = r"^[0-9]{10}$";

/// Compile `pattern` into `cell` on first use.
fn compiled(
    cell: &'static OnceLock<Result<Regex, regex::Error>>,
    pattern: &str,
) -> Result<&'static Regex, ShelfError> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|e| ShelfError::Validation(format!("bad pattern {}: {}", pattern, e)))
}

fn name_regex() -> Result<&'static Regex, ShelfError> {
    static NAME: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    compiled(&NAME, NAME_PATTERN)
}

fn email_regex() -> Result<&'static Regex, ShelfError> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    compiled(&EMAIL, EMAIL_PATTERN)
}

fn phone_regex() -> Result<&'static Regex, ShelfError> {
    static PHONE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    compiled(&PHONE, PHONE_PATTERN)
}

/// ISBN-10 or ISBN-13; hyphens and spaces are ignored, ISBN-10 may end in `X`.
pub fn validate_isbn(isbn: &str) -> Result<(), ShelfError> {
    let digits: Vec<char> = isbn.chars().filter(|c| *c != '-' && *c != ' ').collect();

    let valid = match digits.len() {
        13 => digits.iter().all(char::is_ascii_digit),
        10 => {
            let (body, check) = digits.split_at(9);
            body.iter().all(char::is_ascii_digit)
                && check.iter().all(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ShelfError::Validation(format!(
            "'{}' is not a valid ISBN (10 or 13 digits)",
            isbn
        )))
    }
}

/// Member names: at least 2 characters, ASCII letters and whitespace only.
pub fn validate_name(name: &str) -> Result<(), ShelfError> {
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(ShelfError::Validation(format!(
            "name must be at least {} characters",
            MIN_NAME_LENGTH
        )));
    }
    if !name_regex()?.is_match(name) {
        return Err(ShelfError::Validation(
            "name may contain only letters and spaces".to_string(),
        ));
    }
    Ok(())
}

/// Book titles: 1-100 characters, not blank.
pub fn validate_title(title: &str) -> Result<(), ShelfError> {
    let len = title.chars().count();
    if title.trim().is_empty() || len > MAX_TITLE_LENGTH {
        return Err(ShelfError::Validation(format!(
            "title must be 1-{} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

/// Authors: 2-50 characters of letters, spaces and `.,'-`.
pub fn validate_author(author: &str) -> Result<(), ShelfError> {
    let len = author.chars().count();
    if len < MIN_NAME_LENGTH || len > MAX_AUTHOR_LENGTH {
        return Err(ShelfError::Validation(format!(
            "author must be {}-{} characters",
            MIN_NAME_LENGTH, MAX_AUTHOR_LENGTH
        )));
    }
    if !author
        .chars()
        .all(|c| c.is_alphabetic() || matches!(c, ' ' | '.' | ',' | '\'' | '-'))
    {
        return Err(ShelfError::Validation(
            "author may contain only letters, spaces and .,'-".to_string(),
        ));
    }
    Ok(())
}

/// Contacts: an email address or exactly 10 digits.
pub fn validate_contact(contact: &str) -> Result<(), ShelfError> {
    if phone_regex()?.is_match(contact) || email_regex()?.is_match(contact) {
        Ok(())
    } else {
        Err(ShelfError::Validation(format!(
            "'{}' is neither an email address nor a {}-digit phone number",
            contact, PHONE_DIGITS
        )))
    }
}

//! Field rules shared by the input forms.
//!
//! Each rule sets its own Indonesian message, which ends up in the
//! field → message map of [`AppError::Validation`](forum_warga_common::AppError).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern"));

#[allow(clippy::expect_used)]
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern"));

/// Minimum length of a KTP/KK identity number.
pub const MIN_IDENTITY_LEN: usize = 16;

/// Minimum number of non-blank options of a poll.
pub const MIN_POLL_OPTIONS: usize = 2;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("required", message))
    } else {
        Ok(())
    }
}

pub(crate) fn name(value: &str) -> Result<(), ValidationError> {
    required(value, "Nama wajib diisi")
}

pub(crate) fn email(value: &str) -> Result<(), ValidationError> {
    required(value, "Email wajib diisi")?;
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(error("email", "Format email tidak valid"))
    }
}

pub(crate) fn house_number(value: &str) -> Result<(), ValidationError> {
    required(value, "Nomor rumah wajib diisi")
}

pub(crate) fn rt(value: &str) -> Result<(), ValidationError> {
    required(value, "RT wajib diisi")
}

pub(crate) fn rw(value: &str) -> Result<(), ValidationError> {
    required(value, "RW wajib diisi")
}

pub(crate) fn phone(value: &str) -> Result<(), ValidationError> {
    required(value, "Nomor telepon wajib diisi")?;
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(error("phone", "Format nomor telepon tidak valid"))
    }
}

pub(crate) fn identity_number(value: &str) -> Result<(), ValidationError> {
    required(value, "Nomor identitas wajib diisi")?;
    if value.chars().count() < MIN_IDENTITY_LEN {
        Err(error("length", "Nomor identitas minimal 16 digit"))
    } else {
        Ok(())
    }
}

pub(crate) fn title(value: &str) -> Result<(), ValidationError> {
    required(value, "Judul voting wajib diisi")
}

pub(crate) fn description(value: &str) -> Result<(), ValidationError> {
    required(value, "Deskripsi wajib diisi")
}

pub(crate) fn end_date(value: &str) -> Result<(), ValidationError> {
    required(value, "Tanggal berakhir wajib diisi")?;
    if value.trim().parse::<chrono::NaiveDate>().is_ok() {
        Ok(())
    } else {
        Err(error("date", "Format tanggal tidak valid"))
    }
}

pub(crate) fn poll_options(options: &[String]) -> Result<(), ValidationError> {
    if non_blank(options).count() < MIN_POLL_OPTIONS {
        Err(error("options", "Minimal dua opsi pilihan"))
    } else {
        Ok(())
    }
}

/// Trimmed, non-blank entries of `values`.
pub(crate) fn non_blank(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
}

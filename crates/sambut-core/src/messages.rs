//! Fixed Indonesian user-facing strings.
//!
//! The page ships a single locale; every string a visitor can read lives here
//! so the controllers never embed literals.

pub const NAME_REQUIRED: &str = "Nama harus diisi";
pub const NAME_TOO_SHORT: &str = "Nama minimal 2 karakter";
pub const NAME_INVALID_CHARS: &str = "Nama hanya boleh huruf dan spasi";

pub const EMAIL_REQUIRED: &str = "Email harus diisi";
pub const EMAIL_INVALID: &str = "Email tidak valid";

pub const PHONE_REQUIRED: &str = "Telepon harus diisi";
pub const PHONE_NOT_NUMERIC: &str = "Telepon harus angka";
pub const PHONE_TOO_SHORT: &str = "Minimal 10 digit";
pub const PHONE_TOO_LONG: &str = "Maksimal 15 digit";

pub const MESSAGE_REQUIRED: &str = "Pesan harus diisi";
pub const MESSAGE_TOO_SHORT: &str = "Minimal 10 karakter";
pub const MESSAGE_TOO_LONG: &str = "Maksimal 500 karakter";

/// Greeting input left blank.
pub const GREETING_EMPTY: &str = "Silakan masukkan nama Anda!";

pub const FORM_REJECTED: &str = "Perbaiki form terlebih dahulu";
pub const FORM_ACCEPTED: &str = "Pesan berhasil dikirim!";

pub const HISTORY_EMPTY: &str = "Belum ada pesan yang dikirim.";

/// `Selamat datang, {name}!`
#[must_use]
pub fn welcome(name: &str) -> String {
    format!("Selamat datang, {name}!")
}

/// `Dan {remaining} pesan lainnya...`
#[must_use]
pub fn more_messages(remaining: usize) -> String {
    format!("Dan {remaining} pesan lainnya...")
}

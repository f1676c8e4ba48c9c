//! Fixed inputs and golden digests used across harnesses.
//!
//! Digests were computed independently with `sha256sum` over the exact
//! plaintext shown in each constant's name.

use chrono::{FixedOffset, TimeZone};
use convsync_core::QueryWindow;

/// `sha256("john")`
pub const DIGEST_JOHN: &str = "96d9632f363564cc3032521409cf22a852f2032eec099ed5967c0d000cec607a";
/// `sha256("")`
pub const DIGEST_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
/// `sha256("ca")`
pub const DIGEST_CA: &str = "6959097001d10501ac7d54c0bdb8db61420f658f2922cc26e46d536119a31126";
/// `sha256("12266001303")`
pub const DIGEST_PHONE_226: &str = "b8a74918f3e3f9dfce4b0a1efc96c7594a6d76ec3200c8758ac9b560217b992a";
/// `sha256("+12266001303")`
pub const DIGEST_PHONE_226_PLUS: &str =
    "7465f79abf4b3d7574c37472f496768294945f20edad0c7e2e297240d0f49d29";
/// `sha256("a@b.com")`
pub const DIGEST_EMAIL_AB: &str = "fb98d44ad7501a959f3f4f4a3f004fe2d9e581ea6207e218c4b02c08a4d75adf";
/// `sha256("15551234567")`
pub const DIGEST_PHONE_555: &str = "d6736136ea896c1bfdc553e0e86e702c70d060d805696ca3e4e9e0961353860a";
/// `sha256("1990")`
pub const DIGEST_1990: &str = "a7be8e1fe282a37cd666e0632b17d933fa13f21addf4798fc0455bc166e2488c";
/// `sha256("05")`
pub const DIGEST_05: &str = "c97550ce8213ef5cf6ed4ba48790c137df3ef6a5da20b48961001a634b6cead2";
/// `sha256("07")`
pub const DIGEST_07: &str = "19b100ab7725c612f3d80ff203ca53cea5cadaafae3bf0f88f0fb4089fe08815";
/// `sha256("1990-07-05")`
pub const DIGEST_1990_07_05: &str =
    "84911a161044724df845bf75ffc37e23a5a380729a2fe9782bac7b81e0e413b7";

/// Free-format phone spellings that all normalize to `12266001303`.
pub const PHONE_SPELLINGS_226: &[&str] = &[
    "(226) 600-1303",
    "226-600-1303",
    "226.600.1303",
    "2266001303",
    "1 226 600 1303",
    "+1 (226) 600-1303",
];

/// The window for 2024-01-15 in UTC-5, as computed on the morning after.
pub fn window_2024_01_15() -> QueryWindow {
    let now = FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 16, 6, 30, 0)
        .unwrap();
    QueryWindow::compute(&now, 1)
}

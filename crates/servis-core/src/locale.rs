//! Turkish display strings shared by the renderer and the console.

pub const PLACEHOLDER: &str = "-";
pub const YES: &str = "Evet";
pub const NO: &str = "Hayır";
pub const DELETED: &str = "Silinmiş";
pub const ACTIVE: &str = "Aktif";
pub const UNKNOWN_ERROR: &str = "Bilinmeyen hata";

pub const MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

/// Month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("")
}

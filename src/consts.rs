/// Maximum valid Ethiopian year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Number of months in an Ethiopian year, Pagumen included
pub const MAX_MONTH: u8 = 13;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for Meskerem, the first month
pub const MESKEREM: u8 = 1;
/// Month number for Pagumen, the short 13th month
pub const PAGUMEN: u8 = 13;

/// Length of each of the twelve regular months
pub const DAYS_IN_REGULAR_MONTH: u8 = 30;
/// Pagumen in a common year
pub const PAGUMEN_DAYS: u8 = 5;
/// Pagumen in a leap year
pub const PAGUMEN_DAYS_LEAP: u8 = 6;

/// Days in a week, and columns of a month grid
pub const DAYS_IN_WEEK: usize = 7;

/// Ethiopian year `E` starts in Gregorian year `E + NEW_YEAR_OFFSET`
pub const NEW_YEAR_OFFSET: i32 = 7;
/// Gregorian year whose leap status decides Pagumen of Ethiopian year `E`
/// is `E + LEAP_YEAR_OFFSET`
pub const LEAP_YEAR_OFFSET: i32 = 9;
/// Gregorian month holding the Ethiopian New Year (September)
pub const NEW_YEAR_GREGORIAN_MONTH: u32 = 9;
/// Meskerem 1 in a common year
pub const NEW_YEAR_GREGORIAN_DAY: u32 = 11;
/// Meskerem 1 in the Gregorian year before a leap year
pub const NEW_YEAR_GREGORIAN_DAY_LEAP: u32 = 12;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Ethiopian month names, Meskerem first. Index with `month - 1`.
pub static MONTH_NAMES: [&str; 13] = [
    "መስከረም",
    "ጥቅምት",
    "ኅዳር",
    "ታኅሣሥ",
    "ጥር",
    "የካቲት",
    "መጋቢት",
    "ሚያዝያ",
    "ግንቦት",
    "ሰኔ",
    "ሐምሌ",
    "ነሐሴ",
    "ጳጉሜን",
];

/// Compact month names for ranges and narrow cells
pub static SHORT_MONTH_NAMES: [&str; 13] = [
    "መስከ", "ጥቅም", "ኅዳር", "ታኅሣ", "ጥር", "የካቲ", "መጋቢ", "ሚያዝ", "ግንቦ", "ሰኔ", "ሐምሌ", "ነሐሴ", "ጳጉሜ",
];

/// Day names, Monday first
pub static DAY_NAMES: [&str; 7] = ["ሰኞ", "ማክሰኞ", "ረቡዕ", "ሐሙስ", "ዓርብ", "ቅዳሜ", "እሑድ"];

/// Compact day names for grid headers
pub static SHORT_DAY_NAMES: [&str; 7] = ["ሰኞ", "ማክ", "ረቡ", "ሐሙ", "ዓር", "ቅዳ", "እሑ"];

/// Era marker appended to Ethiopian years ("ዓመተ ምሕረት")
pub const ERA_MARKER: &str = "ዓ.ም";

pub const TODAY_LABEL: &str = "ዛሬ";
pub const TOMORROW_LABEL: &str = "ነገ";
pub const YESTERDAY_LABEL: &str = "ትናንት";

/// Largest absolute day distance rendered as a relative phrase
pub const RELATIVE_WINDOW_DAYS: i64 = 7;

/// Export format separator (`YYYY-MM-DD`)
pub const DATE_SEPARATOR: char = '-';
/// Day-first numeric input separator (`DD/MM/YYYY`)
pub const SLASH_SEPARATOR: char = '/';

/// Input column names (Météo-France monthly climatology layout)
pub const COL_STATION: &str = "NOM_USUEL";
pub const COL_YEAR_MONTH: &str = "AAAAMM";
pub const COL_TMM: &str = "TMM";
pub const COL_TXAB: &str = "TXAB";
pub const COL_TXMIN: &str = "TXMIN";
pub const COL_NBJTX25: &str = "NBJTX25";
pub const COL_RR: &str = "RR";
pub const COL_RRAB: &str = "RRAB";

/// Derived and output column names
pub const COL_YEAR: &str = "AAAA";
pub const COL_MONTH: &str = "MM";
pub const COL_MONTH_NAME: &str = "MOIS";
pub const COL_CITY: &str = "ville";

/// Month names indexed by month number - 1
pub const MONTH_NAMES: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Processing defaults
pub const DEFAULT_DELIMITER: u8 = b';';
pub const DEFAULT_YEAR_MAX_EXCLUSIVE: i32 = 2026;
pub const CSV_EXTENSION: &str = "csv";

/// Moving average defaults
pub const MOVING_AVERAGE_WINDOW: usize = 5;
pub const MOVING_AVERAGE_MIN_PERIODS: usize = 5;

/// Decimal places kept on the mean temperature aggregate and the moving average
pub const ROUND_DIGITS: u32 = 1;

/// Output defaults
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub const DEFAULT_YEARLY_FILENAME: &str = "final_yearly.csv";
pub const DEFAULT_MONTHLY_FILENAME: &str = "final_monthly.csv";

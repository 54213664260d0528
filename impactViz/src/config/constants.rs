// Input Bounds (slider ranges)
pub const WASTE_PROCESSED_MIN: f64 = 5.0;
pub const WASTE_PROCESSED_MAX: f64 = 100.0;
pub const WASTE_PROCESSED_STEP: f64 = 5.0;
pub const WASTE_PROCESSED_DEFAULT: f64 = 15.0;

pub const RECOVERY_RATE_MIN: f64 = 0.5;
pub const RECOVERY_RATE_MAX: f64 = 0.9;
pub const RECOVERY_RATE_STEP: f64 = 0.05;
pub const RECOVERY_RATE_DEFAULT: f64 = 0.8;

pub const LANDFILL_FACTOR_MIN: f64 = 0.4;
pub const LANDFILL_FACTOR_MAX: f64 = 0.6;
pub const LANDFILL_FACTOR_STEP: f64 = 0.01;
pub const LANDFILL_FACTOR_DEFAULT: f64 = 0.52;

pub const SUBSTITUTION_FACTOR_MIN: f64 = 1.5;
pub const SUBSTITUTION_FACTOR_MAX: f64 = 2.5;
pub const SUBSTITUTION_FACTOR_STEP: f64 = 0.1;
pub const SUBSTITUTION_FACTOR_DEFAULT: f64 = 2.0;

pub const PROTEIN_PRICE_MIN: f64 = 1000.0;
pub const PROTEIN_PRICE_MAX: f64 = 5000.0;
pub const PROTEIN_PRICE_STEP: f64 = 100.0;
pub const PROTEIN_PRICE_DEFAULT: f64 = 2000.0;

// Fixed project indicators
pub const JOBS_CREATED: u32 = 2;
pub const SUPPLY_CHAIN_INTERACTIONS: u32 = 3;

// Baseline ("no project") values, no historical data exists
pub const BASELINE_EMISSIONS: f64 = 0.0;
pub const BASELINE_VALORIZED_WASTE: f64 = 0.0;
pub const BASELINE_REVENUE: f64 = 0.0;

// Chart Axis Constants
pub const Y_AXIS_HEADROOM: f64 = 1.15;
pub const TONNAGE_AXIS_FLOOR: f64 = 1.0;
pub const REVENUE_AXIS_FLOOR: f64 = 1000.0;
pub const ANNOTATION_OFFSET: f64 = 0.05;    // Label sits 5% above the bar top
pub const TARGET_TICK_COUNT: f64 = 6.0;
pub const BAR_WIDTH: f64 = 0.6;
pub const X_AXIS_MARGIN: f64 = 0.05;        // Fraction of data span padded on each side
pub const X_LABEL_ROTATION: f64 = 15.0;     // Degrees, counter-clockwise

// Figure Geometry
pub const SVG_UNITS_PER_INCH: f64 = 100.0;
pub const POINTS_PER_INCH: f64 = 72.0;
pub const SINGLE_FIGURE_WIDTH_IN: f64 = 8.0;
pub const SINGLE_FIGURE_HEIGHT_IN: f64 = 6.0;
pub const EXPORT_DPI: u32 = 300;
pub const COMBINED_FILE_NAME: &str = "Graficos_Combinados.png";
pub const METERS_PER_INCH: f64 = 0.0254;

// Font sizes (points)
pub const TITLE_FONT_PT: f64 = 14.0;
pub const AXIS_LABEL_FONT_PT: f64 = 12.0;
pub const TICK_FONT_PT: f64 = 10.0;
pub const TITLE_PAD_PT: f64 = 20.0;
pub const CHART_FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

// Palette
pub const COLOR_PRIMARY_DARK: &str = "#0E454A";
pub const COLOR_PRIMARY_GREEN: &str = "#1FFF5F";
pub const COLOR_BACKGROUND: &str = "#FFFFFF";
pub const COLOR_SUSTREND_LIGHT: &str = "#009BD3";
pub const COLOR_SUSTREND_DARK: &str = "#00366E";
pub const COLOR_SPINE: &str = "#000000";

// Category labels, in drawing order
pub const CATEGORY_LABELS: [&str; 2] = ["Línea Base", "Proyección"];

// Branding
pub const SUSTREND_LOGO_URL: &str = "https://drive.google.com/uc?id=1vx_znPU2VfdkzeDtl91dlpw_p9mmu4dd";
pub const TTGREENFOODS_LOGO_URL: &str = "https://drive.google.com/uc?id=1uIQZQywjuQJz6Eokkj6dNSpBroJ8tQf8";
pub const LOGO_DISPLAY_WIDTH: u32 = 100;
pub const LOGO_FETCH_TIMEOUT_SECS: u64 = 5;

// Dashboard defaults
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8501";
pub const DEFAULT_OUTPUT_DIR: &str = "charts";
pub const VISUALIZER_VERSION: &str = "1.8";

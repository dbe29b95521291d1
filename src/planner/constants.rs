/// Mifflin-St Jeor coefficients.
pub const BMR_WEIGHT_FACTOR: f64 = 10.0;
pub const BMR_HEIGHT_FACTOR: f64 = 6.25;
pub const BMR_AGE_FACTOR: f64 = 5.0;
pub const BMR_MALE_OFFSET: f64 = 5.0;
pub const BMR_FEMALE_OFFSET: f64 = -161.0;

/// TDEE multipliers per activity level.
pub const SEDENTARY_MULT: f64 = 1.2;
pub const LIGHTLY_ACTIVE_MULT: f64 = 1.375;
pub const MODERATELY_ACTIVE_MULT: f64 = 1.55;
pub const VERY_ACTIVE_MULT: f64 = 1.725;
pub const EXTRA_ACTIVE_MULT: f64 = 1.9;

/// Daily calorie adjustment per goal.
pub const LOSE_WEIGHT_ADJUSTMENT: f64 = -500.0;
pub const MAINTAIN_ADJUSTMENT: f64 = 0.0;
pub const GAIN_WEIGHT_ADJUSTMENT: f64 = 300.0;

/// Energy density of macronutrients (kcal per gram).
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;

// ─────────────────────────────────────────────────────────────────────────────
// Meal distribution defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const BREAKFAST_SHARE: f64 = 0.25;
pub const LUNCH_SHARE: f64 = 0.40;
pub const DINNER_SHARE: f64 = 0.35;

/// Allowed deviation of the summed meal shares from 1.0.
pub const DISTRIBUTION_EPSILON: f64 = 1e-3;

pub const BREAKFAST: &str = "Breakfast";
pub const LUNCH: &str = "Lunch";
pub const DINNER: &str = "Dinner";

// ─────────────────────────────────────────────────────────────────────────────
// Meal building
// ─────────────────────────────────────────────────────────────────────────────

pub const STRICT_MAX_ITEMS: usize = 3;
pub const STRICT_TOLERANCE: f64 = 0.05;
pub const FLEXIBLE_MAX_ITEMS: usize = 5;
pub const FLEXIBLE_TOLERANCE: f64 = 0.15;

/// Serving size assumed when the product has none or it cannot be parsed.
pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// Remaining calories below which flexible mode will not scale a portion.
pub const MIN_SCALE_REMAINING_KCAL: f64 = 50.0;

/// Accepted portion scale window, `[MIN_PORTION_SCALE, MAX_PORTION_SCALE)`.
pub const MIN_PORTION_SCALE: f64 = 0.3;
pub const MAX_PORTION_SCALE: f64 = 1.0;

/// Products pulled from bulk discovery when generating a plan.
pub const DEFAULT_DISCOVERY_LIMIT: usize = 50;

/// Minimum Jaro-Winkler similarity for fuzzy product-name lookup.
pub const FUZZY_NAME_THRESHOLD: f64 = 0.80;

/// Serving descriptor for manual items entered without one.
pub const DEFAULT_MANUAL_SERVING: &str = "1 serving";

// ─────────────────────────────────────────────────────────────────────────────
// Customization
// ─────────────────────────────────────────────────────────────────────────────

/// Target changes smaller than this are treated as no-ops.
pub const ADJUST_IDEMPOTENCY_KCAL: f64 = 1.0;

/// Prefix for synthesized manual item identifiers.
pub const MANUAL_ID_PREFIX: &str = "manual_";

// ─────────────────────────────────────────────────────────────────────────────
// Dietary keyword heuristics
// ─────────────────────────────────────────────────────────────────────────────

/// Keywords rejecting a product for vegetarians (and vegans).
pub const MEAT_KEYWORDS: &[&str] = &[
    "meat", "beef", "pork", "chicken", "turkey", "lamb", "veal", "ham", "bacon", "sausage",
    "salami", "chorizo", "duck", "fish", "tuna", "salmon", "cod", "shrimp", "prawn", "anchovy",
    "gelatin",
];

/// Additional keywords rejecting a product for vegans.
pub const ANIMAL_PRODUCT_KEYWORDS: &[&str] = &[
    "milk", "cheese", "butter", "cream", "yogurt", "yoghurt", "egg", "honey", "whey", "casein",
];

//! Human-readable slug generation for plan files, with per-session caching
//! so a session always gets the same plan file name.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;

/// Adjectives used to build a slug.
pub const ADJECTIVES: &[&str] = &[
    "able", "agile", "ample", "ancient", "apt", "arid", "avid", "awake", "blue", "bold", "brave",
    "brief", "bright", "brisk", "broad", "busy", "calm", "candid", "chief", "civil", "clean",
    "clear", "clever", "close", "cold", "cool", "crisp", "crucial", "curious", "daring", "dark",
    "dawn", "deep", "dense", "direct", "distant", "dry", "eager", "early", "easy", "elegant",
    "epic", "even", "exact", "fair", "faint", "fair", "famous", "fast", "fine", "firm", "flat",
    "fleet", "fond", "fresh", "full", "gentle", "giant", "glad", "golden", "good", "grand",
    "great", "green", "grey", "happy", "hardy", "heavy", "high", "hollow", "honest", "huge",
    "humble", "icy", "ideal", "idle", "keen", "kind", "large", "late", "lean", "light", "little",
    "lively", "loose", "loud", "loyal", "lucid", "lucky", "lunar", "mellow", "merry", "mighty",
    "mild", "modern", "modest", "moving", "neat", "new", "nimble", "noble", "odd", "old", "open",
    "orange", "patient", "plain", "plucky", "polite", "prime", "proud", "pure", "quick", "quiet",
    "rapid", "rare", "ready", "real", "regal", "rich", "robust", "round", "royal", "rustic",
    "sage", "sharp", "sheer", "shiny", "short", "shrewd", "silent", "silver", "simple", "sleek",
    "slight", "slim", "sly", "small", "smart", "smooth", "soft", "solar", "solid", "sound",
    "spare", "sparse", "speedy", "steady", "stark", "steep", "still", "stout", "strong",
    "sturdy", "subtle", "sunny", "super", "sure", "swift", "tall", "tame", "tart", "tidy",
    "tight", "tiny", "tough", "true", "trusty", "vast", "vivid", "warm", "wary", "wide",
    "wild", "wise", "witty", "young", "zesty",
];

/// Actions used to build a slug.
pub const ACTIONS: &[&str] = &[
    "aims", "acts", "adapts", "aids", "analyzes", "applies", "argues", "arrives", "asks",
    "assembles", "assesses", "assigns", "attends", "begins", "bends", "binds", "blends", "boosts",
    "branches", "breaks", "bridges", "builds", "calls", "carries", "catches", "chases", "checks",
    "chooses", "claims", "clarifies", "cleans", "climbs", "codes", "collects", "combines",
    "compares", "compiles", "completes", "composes", "computes", "confirms", "connects",
    "considers", "constructs", "converts", "cooks", "copies", "corrects", "counts", "covers",
    "crafts", "creates", "crosses", "decides", "defines", "delivers", "derives", "describes",
    "designs", "detects", "determines", "develops", "diagrams", "directs", "discovers",
    "discusses", "dives", "draws", "drifts", "drives", "earns", "edits", "embraces", "enables",
    "encodes", "enters", "evaluates", "examines", "expands", "explains", "explores", "extends",
    "extracts", "finds", "finishes", "fixes", "flies", "focuses", "follows", "forges", "forms",
    "gathers", "generates", "glides", "grows", "guides", "handles", "helps", "holds", "hunts",
    "identifies", "implements", "improves", "includes", "inspects", "installs", "investigates",
    "joins", "jumps", "keeps", "labels", "launches", "leads", "learns", "lifts", "links",
    "lists", "loads", "locates", "maintains", "makes", "manages", "maps", "marks", "matches",
    "measures", "merges", "moves", "navigates", "notes", "observes", "opens", "organizes",
    "outlines", "paints", "parses", "performs", "picks", "plans", "plants", "plays", "polishes",
    "prepares", "presents", "prints", "processes", "produces", "projects", "proposes", "proves",
    "provides", "publishes", "pulls", "pushes", "raises", "reaches", "reads", "records",
    "refines", "reflects", "refreshes", "registers", "renders", "repairs", "replies", "reports",
    "researches", "resolves", "responds", "restores", "reveals", "reviews", "revises", "runs",
    "saves", "scans", "schedules", "searches", "secures", "seeks", "selects", "sends", "sets",
    "shapes", "shares", "sharpens", "shows", "signs", "simplifies", "sketches", "solves",
    "sorts", "spans", "speaks", "spots", "stages", "starts", "states", "steers", "stores",
    "streams", "strengthens", "studies", "submits", "suggests", "summarizes", "supports",
    "surveys", "sustains", "tackles", "tags", "tests", "thinks", "tracks", "trains",
    "transforms", "translates", "travels", "tunes", "unites", "unlocks", "updates", "uses",
    "validates", "verifies", "views", "visits", "watches", "weaves", "wins", "works", "wraps",
    "writes",
];

/// Nouns used to build a slug.
pub const NOUNS: &[&str] = &[
    "acorn", "agent", "anchor", "angle", "apple", "arbor", "arch", "arrow", "atlas", "atom",
    "aurora", "autumn", "badge", "banner", "basin", "beacon", "bear", "beetle", "bell", "berry",
    "bird", "bison", "blade", "blaze", "bloom", "blossom", "boat", "book", "bough", "boulder",
    "branch", "breeze", "bridge", "brook", "brush", "bubble", "bud", "bulb", "bundle", "buoy",
    "butterfly", "cabin", "cactus", "camp", "canal", "candle", "canoe", "canvas", "canyon",
    "cape", "cardinal", "castle", "cave", "cedar", "chamber", "channel", "charm", "chart",
    "chasm", "cherry", "chest", "circuit", "citadel", "cliff", "cloud", "clover", "coast",
    "coil", "comet", "compass", "coral", "corner", "cottage", "cove", "crane", "crater",
    "creek", "crescent", "crest", "crown", "crystal", "current", "cypress", "dawn", "delta",
    "desert", "dew", "diamond", "dock", "dolphin", "dome", "dove", "dragon", "drift", "drum",
    "dune", "eagle", "ember", "emerald", "engine", "estuary", "falcon", "fern", "field",
    "finch", "fir", "flame", "flare", "fleet", "flint", "flower", "foam", "forest", "forge",
    "fountain", "fox", "frame", "frost", "galaxy", "garden", "gate", "gem", "glacier", "glade",
    "glen", "globe", "gorge", "granite", "grass", "grove", "gull", "harbor", "harvest", "hawk",
    "haven", "hearth", "heath", "heron", "hill", "hollow", "horizon", "hub", "hut", "ice",
    "island", "ivy", "jade", "jasmine", "jay", "jewel", "journey", "jungle", "juniper", "lagoon",
    "lake", "lamp", "lantern", "lark", "leaf", "ledge", "lighthouse", "lily", "lime", "lion",
    "loom", "lotus", "lynx", "maple", "marsh", "meadow", "meridian", "mesa", "meteor", "mill",
    "mirror", "mist", "moon", "moss", "mountain", "nest", "nexus", "nova", "oak", "oasis",
    "ocean", "olive", "orbit", "orchard", "orchid", "osprey", "otter", "owl", "oyster",
    "paddle", "palm", "panda", "pass", "path", "peak", "pearl", "pebble", "petal", "pigeon",
    "pine", "plaza", "pond", "poppy", "port", "prairie", "prism", "quartz", "quay", "rabbit",
    "raven", "reef", "reservoir", "ridge", "ring", "river", "robin", "rock", "root", "rose",
    "rover", "sail", "sand", "sapphire", "scope", "sea", "seal", "season", "shard", "shell",
    "shore", "signal", "silk", "sky", "slope", "sparrow", "spire", "spring", "spruce", "star",
    "stone", "storm", "strait", "stream", "summit", "sun", "swan", "terrace", "thicket",
    "thorn", "thread", "tide", "timber", "torch", "tower", "trail", "trench", "trove", "tulip",
    "tundra", "turtle", "twig", "valley", "vane", "vault", "vine", "violet", "vista", "voyage",
    "wake", "walnut", "waterfall", "wave", "well", "wheat", "willow", "wind", "wing", "wood",
    "wren", "zenith",
];

static SLUG_CACHE: Lazy<Mutex<HashMap<String, String>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Generate a random `adjective-action-noun` slug.
pub fn generate_slug() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).expect("non-empty");
    let action = ACTIONS.choose(&mut rng).expect("non-empty");
    let noun = NOUNS.choose(&mut rng).expect("non-empty");
    format!("{adjective}-{action}-{noun}")
}

/// Get a slug for `session_id`, generating and caching one the first time.
///
/// If `existing` is provided, a newly generated slug is retried (up to 10
/// attempts) until it avoids every entry in `existing`.
pub fn get_unique_slug(session_id: &str, existing: Option<&[String]>) -> String {
    {
        let cache = SLUG_CACHE.lock().expect("slug cache lock poisoned");
        if let Some(slug) = cache.get(session_id) {
            return slug.clone();
        }
    }

    let mut slug = generate_slug();
    if let Some(existing) = existing {
        let mut rng = rand::thread_rng();
        let mut attempts = 0;
        while existing.iter().any(|s| s == &slug) && attempts < 10 {
            let adjective = ADJECTIVES.choose(&mut rng).expect("non-empty");
            let action = ACTIONS.choose(&mut rng).expect("non-empty");
            let noun = NOUNS.choose(&mut rng).expect("non-empty");
            slug = format!("{adjective}-{action}-{noun}");
            attempts += 1;
        }
    }

    let mut cache = SLUG_CACHE.lock().expect("slug cache lock poisoned");
    cache
        .entry(session_id.to_string())
        .or_insert(slug)
        .clone()
}

/// Clear the session→slug cache. Primarily for tests.
pub fn clear_slug_cache() {
    SLUG_CACHE.lock().expect("slug cache lock poisoned").clear();
}

#[cfg(test)]
#[path = "plan_slug.test.rs"]
mod tests;

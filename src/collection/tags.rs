//! Controlled vocabulary of collection subject tags
//!
//! A query that happens to be exactly one of these terms is sent as a tag
//! search, which the API matches against curated subject keywords instead of
//! free text.

use ahash::AHashSet;
use once_cell::sync::Lazy;

/// Subject keyword terms used by the collection
pub const COLLECTION_TAGS: &[&str] = &[
    "Abstraction", "Actors", "Adam", "Adoration of the Magi", "Angels",
    "Animals", "Annunciation", "Apollo", "Apostles", "Architecture",
    "Armor", "Autumn", "Babies", "Bathing", "Bears",
    "Birds", "Boats", "Books", "Bottles", "Boys",
    "Bridges", "Buddha", "Buildings", "Bulls", "Butterflies",
    "Camels", "Castles", "Cathedrals", "Cats", "Cattle",
    "Children", "Christ", "Churches", "Cities", "Clouds",
    "Coats of Arms", "Cows", "Crucifixion", "Dance", "Dancers",
    "Death", "Deer", "Demons", "Dionysus", "Dogs",
    "Dolphins", "Dragons", "Eagles", "Elephants", "Eve",
    "Falcons", "Family", "Farms", "Fish", "Flowers",
    "Flutes", "Forests", "Fruit", "Gardens", "Girls",
    "Goats", "Gods", "Grapes", "Guitars", "Hercules",
    "Hills", "Horses", "Houses", "Hunting", "Insects",
    "Interiors", "Islands", "Jesus", "Kings", "Ladders",
    "Lakes", "Landscapes", "Leaves", "Lions", "Lotuses",
    "Madonna and Child", "Male Nudes", "Masks", "Men", "Mermaids",
    "Monkeys", "Moon", "Mothers", "Mountains", "Musical Instruments",
    "Musicians", "Night", "Nudes", "Oceans", "Owls",
    "Peacocks", "Peonies", "Pine Trees", "Portraits", "Queens",
    "Rabbits", "Rain", "Rivers", "Roses", "Ruins",
    "Sailboats", "Saints", "Satyrs", "Sculpture", "Seascapes",
    "Sheep", "Ships", "Skeletons", "Skulls", "Snakes",
    "Snow", "Soldiers", "Spring", "Stars", "Still Life",
    "Street Scene", "Summer", "Sun", "Sunflowers", "Swans",
    "Swords", "Tigers", "Trees", "Venus", "Virgin Mary",
    "Warriors", "Water", "Waterfalls", "Waves", "Weapons",
    "Windmills", "Wine", "Winter", "Women", "Writing",
    "Zeus",
];

static TAG_INDEX: Lazy<AHashSet<String>> = Lazy::new(|| {
    COLLECTION_TAGS
        .iter()
        .map(|tag| tag.to_lowercase())
        .collect()
});

/// Whole-string, case-insensitive membership in the tag vocabulary
#[must_use]
pub fn is_collection_tag(query: &str) -> bool {
    TAG_INDEX.contains(&query.to_lowercase())
}

use rand::Rng;

/// Built-in practice prompts for solo and versus tests.
pub const PROMPTS: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog and runs through the forest with incredible speed and agility.",
    "Music has the power to transport us to different worlds and evoke emotions we never knew existed within our souls.",
    "Typing to the rhythm of a beat creates a unique harmony between mind, fingers, and sound that enhances focus.",
    "In the digital age, fast and accurate typing has become an essential skill for productivity and communication.",
    "Every keystroke creates a symphony of clicks that forms the foundation of modern digital expression and creativity.",
];

/// Picks one of the built-in prompts at random.
pub fn random_prompt() -> &'static str {
    PROMPTS[rand::rng().random_range(0..PROMPTS.len())]
}

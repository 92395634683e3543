/// Flavor-text titles handed out to matches, in assignment order
pub const MATCH_TITLES: [&str; 10] = [
    "Perfect Debugging Duo 🐛",
    "Merge Conflict Soulmates 💕",
    "Co-founders in Love 🚀",
    "404: Loneliness Not Found 💘",
    "Git Commit Partners 💝",
    "Pair Programming Sweethearts 👩‍💻❤️👨‍💻",
    "Stack Overflow Soulmates 📚",
    "Deploy Together Forever 🌐",
    "Infinite Loop of Love ♾️",
    "Best Branch Match 🌿",
];

/// Title for the match accepted at `index`, cycling through the pool
#[inline]
pub fn title_for(index: usize) -> &'static str {
    MATCH_TITLES[index % MATCH_TITLES.len()]
}

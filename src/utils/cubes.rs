use crate::models::BoardSize;

/// The sixteen cubes of a classic 4x4 board
pub const STANDARD_CUBES: [&str; 16] = [
    "AAEEGN", "ABBJOO", "ACHOPS", "AFFKPS",
    "AOOTTW", "CIMOTU", "DEILRX", "DELRVY",
    "DISTTY", "EEGHNW", "EEINSU", "EHRTVW",
    "EIOSST", "ELRTTY", "HIMNQU", "HLNNRZ",
];

/// The twenty-five cubes of a 5x5 board
pub const BIG_BOGGLE_CUBES: [&str; 25] = [
    "AAAFRS", "AAEEEE", "AAFIRS", "ADENNN", "AEEEEM",
    "AEEGMU", "AEGMNN", "AFIRSY", "BJKQXZ", "CCNSTW",
    "CEIILT", "CEILPT", "CEIPST", "DDLNOR", "DDHNOT",
    "DHHLOR", "DHLNOR", "EIIITT", "EMOTTT", "ENSSSU",
    "FIPRSY", "GORRVW", "HIPRRY", "NOOTUW", "OOOTTU",
];

/// Get the default cube set for a board size
pub fn default_cubes(size: BoardSize) -> Vec<String> {
    let cubes: &[&str] = match size {
        BoardSize::Standard => &STANDARD_CUBES,
        BoardSize::Big => &BIG_BOGGLE_CUBES,
    };

    cubes.iter().map(|cube| cube.to_string()).collect()
}

/// Normalize a typed cube configuration, returning `None` when it is not
/// a non-empty run of ASCII letters
pub fn parse_cube(input: &str) -> Option<String> {
    let cube = input.trim();
    if cube.is_empty() || !cube.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }

    Some(cube.to_ascii_uppercase())
}

/// English ordinal suffix used when prompting for the nth cube
pub fn ordinal_suffix(n: usize) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }

    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

//! Random nickname suggestions for accounts registered without one.

use rand::seq::SliceRandom;
use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "clever", "jolly", "brave", "sly", "gentle", "swift", "quiet", "bold", "witty", "calm",
    "eager", "lucky", "sunny", "noble", "keen", "mellow",
];

const NOUNS: &[&str] = &[
    "panda", "fox", "koala", "lion", "otter", "falcon", "badger", "heron", "lynx", "walrus",
    "raven", "tiger", "gecko", "bison", "marten", "puffin",
];

/// Build an `adjective_noun_number` nickname, e.g. `witty_otter_417`.
///
/// Every suggestion passes [`super::validate_nickname`].
pub fn generate_nickname() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("clever");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("panda");
    let number: u16 = rng.gen_range(0..1000);
    format!("{adjective}_{noun}_{number}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_nickname;

    #[test]
    fn test_generated_nicknames_are_valid() {
        for _ in 0..200 {
            let nickname = generate_nickname();
            assert_eq!(
                validate_nickname(Some(&nickname)).unwrap(),
                Some(nickname.clone()),
                "{nickname} should validate"
            );
        }
    }

    #[test]
    fn test_longest_combination_fits() {
        let adjective = ADJECTIVES.iter().map(|a| a.len()).max().unwrap();
        let noun = NOUNS.iter().map(|n| n.len()).max().unwrap();
        assert!(adjective + noun + "_".len() * 2 + 3 <= 30);
    }
}

//! CharacterService: record-level operations over a character store.

mod character;
pub use character::CharacterService;

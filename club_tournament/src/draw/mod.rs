//! Randomness for the draw.
//!
//! Every randomized step (which groups are undersized, where BYEs land, how
//! unseeded players fill the bracket) goes through [`DrawRandomizer`], so a
//! draw can be replayed exactly by seeding it.

pub mod randomizer;

pub use randomizer::DrawRandomizer;

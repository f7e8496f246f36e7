//! Determinism testing utilities.
//!
//! Provides a harness for verifying that a game produces identical results
//! given identical configuration and inputs.
//!
//! # Testing Strategy
//!
//! Sources of non-determinism a game session has to avoid:
//!
//! - **System randomness**: map generation uses its own seeded LCG and every
//!   other roll (AI, city names) comes from a `ChaCha8Rng` seeded from the
//!   game seed.
//!
//! - **HashMap iteration order**: civilizations, units and cities live in
//!   vectors; per-civilization sets are `BTreeSet`s.
//!
//! - **Floating-point math**: combat damage uses fixed-point arithmetic via
//!   [`civ_core::math::Fixed`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use civ_core::game::Game;

use crate::fixtures::play_round;

/// Final hashes of repeated runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// All final hashes are equal.
    pub is_deterministic: bool,
    /// Final hash of each run.
    pub hashes: Vec<u64>,
    /// Rounds played per run.
    pub rounds: u64,
}

impl DeterminismResult {
    /// Distinct final hashes.
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Fail with every hash listed when the runs disagree.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "{} runs of {} rounds ended in {} different states: {:?}",
                self.hashes.len(),
                self.rounds,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Build a state `runs` times, advance each copy `rounds` times and compare
/// the final hashes.
///
/// # Example
///
/// ```ignore
/// use civ_test_utils::determinism::verify_determinism;
/// use civ_test_utils::fixtures::{generated_game, play_round};
///
/// let result = verify_determinism(
///     3,  // Run 3 times
///     20, // 20 rounds each
///     || generated_game(42, 30, 20, 2),
///     |game| { play_round(game); },
///     |game| game.state_hash(),
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    rounds: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..rounds {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        rounds,
    }
}

/// Play the same game twice for `rounds` full rounds and compare the final
/// state hashes.
pub fn verify_game_determinism<F>(setup_fn: F, rounds: u64) -> bool
where
    F: Fn() -> Game,
{
    let result = verify_determinism(
        2,
        rounds,
        &setup_fn,
        |game| {
            play_round(game);
        },
        Game::state_hash,
    );
    result.is_deterministic
}

/// Result of parallel game runs.
#[derive(Debug, Clone)]
pub struct ParallelRunResult {
    /// Final state hash from each game.
    pub hashes: Vec<u64>,
    /// Number of rounds each game ran.
    pub rounds: u64,
}

impl ParallelRunResult {
    /// Check if all games produced identical results.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.hashes.windows(2).all(|w| w[0] == w[1])
    }
}

/// Play `num_games` copies of a game on scoped threads and collect the final
/// hashes.
///
/// # Panics
///
/// Panics if a game thread panics.
pub fn run_parallel_games<F>(setup_fn: F, num_games: usize, rounds: u64) -> ParallelRunResult
where
    F: Fn() -> Game + Sync,
{
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..num_games)
            .map(|_| {
                s.spawn(|| {
                    let mut game = setup_fn();
                    for _ in 0..rounds {
                        play_round(&mut game);
                    }
                    game.state_hash()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("game thread panicked"))
            .collect()
    });

    ParallelRunResult { hashes, rounds }
}

/// Compare two games round by round, finding the first divergence.
///
/// # Returns
///
/// `None` if the games stay identical, `Some(round)` if they diverge after
/// that round (0 means the initial states already differ).
pub fn find_first_divergence<F>(setup_fn: F, rounds: u64) -> Option<u64>
where
    F: Fn() -> Game,
{
    let mut a = setup_fn();
    let mut b = setup_fn();

    if a.state_hash() != b.state_hash() {
        return Some(0);
    }

    for round in 1..=rounds {
        play_round(&mut a);
        play_round(&mut b);

        if a.state_hash() != b.state_hash() {
            return Some(round);
        }
    }

    None
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for game inputs.
pub mod strategies {
    use civ_core::config::GameConfig;
    use civ_core::hex_grid::HexCoord;
    use civ_core::terrain::Terrain;
    use civ_core::unit::UnitType;
    use proptest::prelude::*;

    /// Generate a generation seed.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Generate a map size from tiny to medium.
    pub fn arb_map_size() -> impl Strategy<Value = (u32, u32)> {
        (4u32..=40, 4u32..=30)
    }

    /// Generate an in-bounds coordinate for a `width` x `height` grid.
    pub fn arb_coord(width: u32, height: u32) -> impl Strategy<Value = HexCoord> {
        let max_col = i32::try_from(width).unwrap_or(i32::MAX);
        let max_row = i32::try_from(height).unwrap_or(i32::MAX);
        (0..max_col, 0..max_row).prop_map(|(col, row)| HexCoord::new(col, row))
    }

    /// Generate any terrain.
    pub fn arb_terrain() -> impl Strategy<Value = Terrain> {
        proptest::sample::select(Terrain::ALL.to_vec())
    }

    /// Generate any unit type.
    pub fn arb_unit_type() -> impl Strategy<Value = UnitType> {
        proptest::sample::select(UnitType::ALL.to_vec())
    }

    /// Generate a valid game configuration.
    pub fn arb_config() -> impl Strategy<Value = GameConfig> {
        (arb_seed(), arb_map_size(), 0u32..=3).prop_map(|(seed, (w, h), ai)| {
            GameConfig::default()
                .with_seed(seed)
                .with_map_size(w, h)
                .with_ai_civilizations(ai)
        })
    }
}

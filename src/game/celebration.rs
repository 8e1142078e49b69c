//! Post-win card scatter
//!
//! Purely cosmetic. Launched cards are copies of foundation cards; the
//! foundations themselves are never touched, the draw pass just hides the
//! cards that have already been launched.

use crate::board::Board;
use crate::config::CelebrationConfig;
use crate::core::{Card, Size, Suit, Vec2};
use crate::piles::PileId;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// A card flying around the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedCard {
    pub card: Card,
    pub pos: Vec2,
    /// Pixels per tick
    pub velocity: Vec2,
    /// Pixels per tick, per second
    pub acceleration: Vec2,
}

impl AnimatedCard {
    /// Launch `card` from `origin`, pulled in a direction set by its suit
    /// and pushed sideways at `speed`
    pub fn launch(card: Card, origin: Vec2, magnitude: f32, speed: f32) -> Self {
        let (acceleration, velocity) = match card.suit() {
            Suit::Spades => (Vec2::new(0.0, magnitude), Vec2::new(speed, 0.0)),
            Suit::Clubs => (Vec2::new(0.0, -magnitude), Vec2::new(speed, 0.0)),
            Suit::Hearts => (Vec2::new(magnitude, 0.0), Vec2::new(0.0, speed)),
            Suit::Diamonds => (Vec2::new(-magnitude, 0.0), Vec2::new(0.0, speed)),
        };
        AnimatedCard {
            card,
            pos: origin,
            velocity,
            acceleration,
        }
    }

    /// Advance one tick, bouncing off the window edges
    pub fn step(&mut self, dt: f32, window: Size, card: Size) {
        self.velocity.x += self.acceleration.x * dt;
        self.velocity.y += self.acceleration.y * dt;
        self.pos.x += self.velocity.x;
        self.pos.y += self.velocity.y;

        let max_x = (window.width - card.width) as f32;
        let max_y = (window.height - card.height) as f32;
        if self.pos.x < 0.0 || self.pos.x > max_x {
            self.pos.x = self.pos.x.clamp(0.0, max_x.max(0.0));
            self.velocity.x = -self.velocity.x;
        }
        if self.pos.y < 0.0 || self.pos.y > max_y {
            self.pos.y = self.pos.y.clamp(0.0, max_y.max(0.0));
            self.velocity.y = -self.velocity.y;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Celebration {
    config: CelebrationConfig,
    rng: Xoshiro256PlusPlus,
    /// Seconds until the next launch
    pop_timer: f32,
    /// Cards already launched from each foundation, counted from the top
    launched: Vec<usize>,
    cards: Vec<AnimatedCard>,
}

impl Celebration {
    pub fn new(config: CelebrationConfig, seed: u64) -> Self {
        Celebration {
            config,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            pop_timer: 0.0,
            launched: vec![0; Suit::ALL.len()],
            cards: Vec::new(),
        }
    }

    /// Drop every launched card; the RNG stream carries on
    pub fn reset(&mut self) {
        self.pop_timer = 0.0;
        self.launched.iter_mut().for_each(|n| *n = 0);
        self.cards.clear();
    }

    pub fn cards(&self) -> &[AnimatedCard] {
        &self.cards
    }

    /// How many cards have left foundation `index`
    pub fn launched(&self, index: usize) -> usize {
        self.launched.get(index).copied().unwrap_or(0)
    }

    pub fn is_idle(&self) -> bool {
        self.cards.is_empty()
    }

    /// Advance the animation by `dt` seconds
    pub fn tick(&mut self, dt: f32, board: &Board) {
        self.pop_timer -= dt;
        if self.pop_timer < 0.0 {
            let (min, max) = self.config.pop_interval;
            self.pop_timer = if max > min {
                self.rng.gen_range(min..=max)
            } else {
                min
            };
            self.launch_one(board);
        }

        let window = board.window();
        let card = board.layout().card;
        for animated in &mut self.cards {
            animated.step(dt, window, card);
        }
    }

    /// Launch the next card of a randomly chosen foundation, if it has one left
    fn launch_one(&mut self, board: &Board) {
        let index = self.rng.gen_range(0..self.launched.len());
        let Some(pile) = board.get(PileId::Foundation(index as u8)) else {
            return;
        };
        let already = self.launched[index];
        if already >= pile.len() {
            return;
        }
        let card = pile.cards()[pile.len() - 1 - already];
        self.launched[index] += 1;

        let max_speed = self.config.max_launch_speed.max(1);
        let magnitude = self.rng.gen_range(1..=max_speed);
        let speed = if self.rng.gen_bool(0.5) {
            magnitude
        } else {
            -magnitude
        };
        self.cards.push(AnimatedCard::launch(
            card,
            Vec2::from(pile.rect().top_left()),
            self.config.acceleration,
            speed as f32,
        ));
    }
}

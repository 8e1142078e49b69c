//! The board: every pile in the game, in hit-test order
//!
//! Piles are stored in the order the pointer searches them: stock, waste,
//! tableau piles left to right, then foundations. A [`PileId`] maps to a
//! fixed slot in that order.

use crate::core::{Card, Layout, Point, Rank, Rect, Size, Suit};
use crate::piles::{stock, Pile, PileId, PileKind, StockClick};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    piles: Vec<Pile>,
    tableau_count: usize,
    max_rank: Rank,
    layout: Layout,
    window: Size,
}

impl Board {
    /// Create an empty board with `tableau_count` tableau piles
    ///
    /// `visible_waste` is how many waste cards are fanned out (the deal count).
    pub fn new(
        tableau_count: usize,
        max_rank: Rank,
        visible_waste: usize,
        layout: Layout,
        window: Size,
    ) -> Self {
        let mut piles = Vec::with_capacity(2 + tableau_count + Suit::ALL.len());
        piles.push(Pile::new(PileId::Stock, PileKind::Stock));
        piles.push(Pile::new(
            PileId::Waste,
            PileKind::Waste {
                visible: visible_waste,
                dragging: false,
            },
        ));
        for i in 0..tableau_count {
            piles.push(Pile::new(
                PileId::Tableau(i as u8),
                PileKind::Tableau { king: max_rank },
            ));
        }
        for (i, suit) in Suit::ALL.iter().enumerate() {
            piles.push(Pile::new(
                PileId::Foundation(i as u8),
                PileKind::Foundation { suit: *suit },
            ));
        }

        let mut board = Board {
            piles,
            tableau_count,
            max_rank,
            layout,
            window,
        };
        board.set_positions(window);
        board
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn window(&self) -> Size {
        self.window
    }

    pub fn max_rank(&self) -> Rank {
        self.max_rank
    }

    pub fn tableau_count(&self) -> usize {
        self.tableau_count
    }

    fn index(&self, id: PileId) -> Option<usize> {
        match id {
            PileId::Stock => Some(0),
            PileId::Waste => Some(1),
            PileId::Tableau(i) if (i as usize) < self.tableau_count => Some(2 + i as usize),
            PileId::Foundation(i) if (i as usize) < Suit::ALL.len() => {
                Some(2 + self.tableau_count + i as usize)
            }
            _ => None,
        }
    }

    /// Look up a pile; `None` for a tableau or foundation index off the board
    pub fn get(&self, id: PileId) -> Option<&Pile> {
        self.index(id).map(|i| &self.piles[i])
    }

    /// Panics if `id` is not on this board
    pub fn pile(&self, id: PileId) -> &Pile {
        match self.get(id) {
            Some(pile) => pile,
            None => panic!("pile {id} is not on this board"),
        }
    }

    pub fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        match self.index(id) {
            Some(i) => &mut self.piles[i],
            None => panic!("pile {id} is not on this board"),
        }
    }

    /// Mutable access to two distinct piles at once
    pub fn pair_mut(&mut self, a: PileId, b: PileId) -> (&mut Pile, &mut Pile) {
        let (ia, ib) = match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => (ia, ib),
            _ => panic!("pile pair {a}/{b} is not on this board"),
        };
        assert_ne!(ia, ib, "pair_mut needs two different piles");
        if ia < ib {
            let (lo, hi) = self.piles.split_at_mut(ib);
            (&mut lo[ia], &mut hi[0])
        } else {
            let (lo, hi) = self.piles.split_at_mut(ia);
            (&mut hi[0], &mut lo[ib])
        }
    }

    /// All piles in pointer search order
    pub fn piles(&self) -> impl Iterator<Item = &Pile> {
        self.piles.iter()
    }

    pub fn tableaux(&self) -> impl Iterator<Item = &Pile> {
        self.piles[2..2 + self.tableau_count].iter()
    }

    pub fn foundations(&self) -> impl Iterator<Item = &Pile> {
        self.piles[2 + self.tableau_count..].iter()
    }

    /// Ids of the piles that can receive drops, in the order they are tried
    pub fn drop_targets(&self) -> impl Iterator<Item = PileId> + '_ {
        self.tableaux().chain(self.foundations()).map(|p| p.id())
    }

    /// First pile whose pickup region contains `pos`
    pub fn pile_at(&self, pos: Point) -> Option<PileId> {
        self.piles
            .iter()
            .find(|p| p.click_rect().contains(pos))
            .map(|p| p.id())
    }

    /// Clear every pile, build one card per (rank, suit), shuffle it into
    /// the stock and deal the tableau
    ///
    /// Tableau pile `i` receives `i + 1` cards; only its last card is turned
    /// face up. Everything else stays face down in the stock.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for pile in &mut self.piles {
            pile.clear();
        }

        let max_rank = self.max_rank.value();
        let stock = self.pile_mut(PileId::Stock);
        for rank in 1..=max_rank {
            for suit in Suit::ALL {
                stock.push(Card::new(Rank::new(rank), suit));
            }
        }
        stock.shuffle(rng);

        for i in 0..self.tableau_count {
            let (stock, tableau) = self.pair_mut(PileId::Stock, PileId::Tableau(i as u8));
            for _ in 0..=i {
                if let Some(card) = stock.pop() {
                    tableau.push(card);
                }
            }
            if let Some(top) = tableau.top_mut() {
                top.flip(true);
            }
        }

        self.recompute_hit_regions();
    }

    /// Replace the contents of pile `id`, bottom card first
    ///
    /// For setting up a position directly instead of dealing it.
    pub fn set_cards<I: IntoIterator<Item = Card>>(&mut self, id: PileId, cards: I) {
        let layout = self.layout;
        let pile = self.pile_mut(id);
        pile.clear();
        for card in cards {
            pile.push(card);
        }
        pile.recompute_hit_regions(&layout);
    }

    /// Handle a click on the stock (deal to the waste, or reload from it)
    pub fn click_stock(&mut self, deal_count: usize) -> StockClick {
        let layout = self.layout;
        let (stock_pile, waste) = self.pair_mut(PileId::Stock, PileId::Waste);
        let outcome = stock::click(stock_pile, waste, deal_count);
        stock_pile.recompute_hit_regions(&layout);
        waste.recompute_hit_regions(&layout);
        outcome
    }

    /// True when every foundation holds the full rank range of its suit
    pub fn foundations_complete(&self) -> bool {
        let full = self.max_rank.value() as usize;
        self.foundations().all(|f| f.len() == full)
    }

    pub fn recompute_hit_regions(&mut self) {
        let layout = self.layout;
        for pile in &mut self.piles {
            pile.recompute_hit_regions(&layout);
        }
    }

    /// Lay the board out centred in a window of the given size
    ///
    /// Tableau drop zones run the full window height in their column;
    /// foundation drop zones run from the foundation column to the right
    /// edge of the window, so they all overlap and are tried in suit order.
    pub fn set_positions(&mut self, window: Size) {
        self.window = window;
        let layout = self.layout;
        let card = layout.card;
        let board = layout.board_size(self.tableau_count, self.max_rank.value());
        let origin = Point::new(
            (window.width - board.width) / 2,
            (window.height - board.height) / 2,
        );

        let stock_rect = Rect::at(origin, card);
        let stock = self.pile_mut(PileId::Stock);
        stock.set_anchor(stock_rect, &layout);
        stock.set_drop_rect(stock_rect);

        let waste_rect = Rect::new(
            origin.x,
            stock_rect.bottom() + layout.pile_spacing,
            card.width,
            card.height,
        );
        let waste = self.pile_mut(PileId::Waste);
        waste.set_anchor(waste_rect, &layout);
        waste.set_drop_rect(waste_rect);

        let mut last_right = stock_rect.right();
        for i in 0..self.tableau_count {
            let x = stock_rect.right()
                + layout.extra_pile_spacing
                + (card.width + layout.pile_spacing) * i as i32;
            let rect = Rect::new(x, origin.y, card.width, card.height);
            let tableau = self.pile_mut(PileId::Tableau(i as u8));
            tableau.set_anchor(rect, &layout);
            tableau.set_drop_rect(Rect::new(x, 0, card.width, window.height));
            last_right = rect.right();
        }

        let foundation_x = last_right + layout.extra_pile_spacing;
        for i in 0..Suit::ALL.len() {
            let y = origin.y + (card.height + layout.pile_spacing) * i as i32;
            let rect = Rect::new(foundation_x, y, card.width, card.height);
            let foundation = self.pile_mut(PileId::Foundation(i as u8));
            foundation.set_anchor(rect, &layout);
            foundation.set_drop_rect(Rect::new(
                foundation_x,
                0,
                window.width - foundation_x,
                window.height,
            ));
        }
    }

    /// A pointer position that starts a pickup of exactly `count` cards
    /// from `id`, or `None` if no position can
    pub fn grab_point(&self, id: PileId, count: usize) -> Option<Point> {
        let pile = self.get(id)?;
        let rect = pile.click_rect();
        let x = rect.x + rect.w / 2;
        match pile.kind() {
            PileKind::Stock => Some(Point::new(x, rect.y + rect.h / 2)),
            PileKind::Waste { .. } | PileKind::Foundation { .. } => {
                (count == 1 && !pile.is_empty()).then(|| Point::new(x, rect.y + rect.h / 2))
            }
            PileKind::Tableau { .. } => {
                let available = crate::piles::tableau::face_up_run(pile.cards());
                if count == 0 || count > available {
                    return None;
                }
                let y = if count == 1 {
                    rect.bottom() - 1
                } else {
                    rect.bottom()
                        - self.layout.card.height
                        - (count as i32 - 2) * self.layout.card_spacing
                        - 1
                };
                Some(Point::new(x, y))
            }
        }
    }

    /// A pointer position inside the drop zone of `id`
    pub fn drop_point(&self, id: PileId) -> Option<Point> {
        let rect = self.get(id)?.drop_rect();
        Some(Point::new(rect.x + rect.w / 2, rect.y + rect.h / 2))
    }
}

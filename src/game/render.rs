//! Drawing as data
//!
//! The engine never touches pixels. [`Solitaire::draw`] walks the board and
//! hands a [`DrawCall`] per sprite to a host-supplied [`Surface`]; the host
//! decides what a card back or a suit slot looks like.

use crate::core::{Card, Layout, Point, Suit};
use crate::game::state::Solitaire;
use crate::piles::{Pile, PileKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawCall {
    /// A card, front or back depending on its orientation
    Card { card: Card, at: Point },
    /// The marker shown on an empty stock
    ReloadMarker { at: Point },
    /// The outline a foundation shows under its cards
    SuitSlot { suit: Suit, at: Point },
}

pub trait Surface {
    fn draw(&mut self, call: DrawCall);
}

/// A surface that just records what it was asked to draw
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        DrawList::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Every card drawn, in draw order
    pub fn cards(&self) -> impl Iterator<Item = (Card, Point)> + '_ {
        self.calls.iter().filter_map(|call| match *call {
            DrawCall::Card { card, at } => Some((card, at)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn draw(&mut self, call: DrawCall) {
        self.calls.push(call);
    }
}

impl Solitaire {
    /// Draw the whole game, back to front
    ///
    /// Depends only on pile contents, the active drag and the celebration;
    /// nothing is mutated.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let layout = self.board.layout();

        for pile in self.board.piles() {
            match pile.kind() {
                PileKind::Stock => match pile.peek_top() {
                    Some(card) => surface.draw(DrawCall::Card {
                        card: *card,
                        at: pile.rect().top_left(),
                    }),
                    None => surface.draw(DrawCall::ReloadMarker {
                        at: pile.rect().top_left(),
                    }),
                },
                PileKind::Waste { visible, dragging } => {
                    // the held card keeps its slot, so one fewer is filled
                    let shown = visible.saturating_sub(usize::from(dragging));
                    let start = pile.len().saturating_sub(shown);
                    draw_cards(surface, pile, start, layout);
                }
                PileKind::Tableau { .. } => draw_cards(surface, pile, 0, layout),
                PileKind::Foundation { suit } => {
                    let at = pile.rect().top_left();
                    surface.draw(DrawCall::SuitSlot { suit, at });

                    let index = suit.index();
                    let remaining = pile.len().saturating_sub(self.celebration.launched(index));
                    if let Some(card) = remaining.checked_sub(1).map(|i| pile.cards()[i]) {
                        surface.draw(DrawCall::Card { card, at });
                    }
                }
            }
        }

        if let Some(drag) = &self.drag {
            let origin = drag.origin();
            for (i, card) in drag.lot().iter().enumerate() {
                surface.draw(DrawCall::Card {
                    card: *card,
                    at: Point::new(origin.x, origin.y + i as i32 * layout.card_spacing),
                });
            }
        }

        for animated in self.celebration.cards() {
            surface.draw(DrawCall::Card {
                card: animated.card,
                at: animated.pos.to_point(),
            });
        }
    }
}

fn draw_cards<S: Surface + ?Sized>(
    surface: &mut S,
    pile: &Pile,
    start: usize,
    layout: &Layout,
) {
    for (i, card) in pile.cards().iter().enumerate().skip(start) {
        surface.draw(DrawCall::Card {
            card: *card,
            at: pile.card_origin(i, layout),
        });
    }
}

use std::collections::HashMap;

use blackjack_engine::cards::{full_deck, Card};
use blackjack_engine::errors::GameError;
use blackjack_engine::shoe::Shoe;

fn counts(cards: &[Card]) -> HashMap<Card, usize> {
    let mut m = HashMap::new();
    for &c in cards {
        *m.entry(c).or_insert(0) += 1;
    }
    m
}

#[test]
fn reset_builds_full_composition() {
    let mut shoe = Shoe::new(4, 1).unwrap();
    shoe.reset(4);
    assert_eq!(shoe.remaining(), 208);
    let m = counts(shoe.cards());
    assert_eq!(m.len(), 52);
    assert!(m.values().all(|&n| n == 4));
    assert!(full_deck().iter().all(|c| m.contains_key(c)));
}

#[test]
fn shuffle_only_changes_order() {
    let mut shoe = Shoe::new(4, 2).unwrap();
    shoe.reset(4);
    let before = counts(shoe.cards());
    let ordered = shoe.cards().to_vec();
    shoe.shuffle();
    assert_eq!(counts(shoe.cards()), before);
    assert_ne!(shoe.cards(), ordered.as_slice());
}

#[test]
fn draw_removes_exactly_one_card() {
    let mut shoe = Shoe::new(4, 3).unwrap();
    let mut drawn = Vec::new();
    for i in 0..208 {
        assert_eq!(shoe.remaining(), 208 - i);
        drawn.push(shoe.draw().unwrap());
    }
    assert_eq!(shoe.remaining(), 0);
    assert_eq!(shoe.draw(), Err(GameError::EmptyShoe));

    // drawn cards make up the full composition
    let m = counts(&drawn);
    assert!(m.values().all(|&n| n == 4));
}

#[test]
fn short_shoe_is_replaced_before_a_batch() {
    let mut shoe = Shoe::new(4, 4).unwrap();
    while shoe.remaining() > 3 {
        shoe.draw().unwrap();
    }
    assert!(shoe.ensure_available(4));
    assert_eq!(shoe.remaining(), 208);
    assert!(counts(shoe.cards()).values().all(|&n| n == 4));
}

#[test]
fn sufficient_shoe_is_left_alone() {
    let mut shoe = Shoe::new(1, 5).unwrap();
    while shoe.remaining() > 4 {
        shoe.draw().unwrap();
    }
    let before = shoe.cards().to_vec();
    assert!(!shoe.ensure_available(4));
    assert_eq!(shoe.cards(), before.as_slice());
}

#[test]
fn same_seed_same_order() {
    let a = Shoe::new(4, 12345).unwrap();
    let b = Shoe::new(4, 12345).unwrap();
    let c = Shoe::new(4, 54321).unwrap();
    assert_eq!(a.cards(), b.cards());
    assert_ne!(a.cards(), c.cards());
}

#[test]
fn zero_decks_is_rejected() {
    assert!(matches!(Shoe::new(0, 1), Err(GameError::InvalidConfig(_))));
}

#[test]
fn reset_with_zero_decks_builds_one_deck() {
    let mut shoe = Shoe::new(4, 5).unwrap();
    shoe.reset(0);
    assert_eq!(shoe.decks(), 1);
    assert_eq!(shoe.remaining(), 52);
    assert_eq!(shoe.capacity(), 52);
}

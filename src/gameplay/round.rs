use super::dealer::dealer_play;
use super::settlement::Settlement;
use super::strategy::Strategy;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::cards::shoe::Shoe;
use crate::table::PayoutTable;
use crate::Chips;
use crate::BASE_BET;

/// one round of cash-out blackjack at the base bet.
///
/// the player sees two cards and the dealer's upcard. a natural is
/// settled against the hole card at once. otherwise any hand that
/// may cash out does so at the table's price, and a hard 17 or better
/// stands against the dealer. every standing hand meets a dealer of
/// its own: a fresh hole card and a fresh set of draws behind the
/// shared upcard.
pub struct Round<'a> {
    shoe: &'a mut Shoe,
    table: &'a PayoutTable,
    upcard: Card,
}

impl<'a> Round<'a> {
    pub fn play(shoe: &'a mut Shoe, table: &'a PayoutTable, strategy: Strategy) -> Settlement {
        shoe.replenish();
        let player = Hand::from_iter([shoe.deal(), shoe.deal()]);
        let upcard = shoe.deal();
        let mut round = Self {
            shoe,
            table,
            upcard,
        };
        if player.is_natural() {
            round.natural()
        } else if round.must_split(&player, strategy) {
            round.split(player)
        } else {
            round.single(player)
        }
    }
}

/// policy
impl Round<'_> {
    fn must_split(&self, hand: &Hand, strategy: Strategy) -> bool {
        strategy == Strategy::Split && hand.is_pair()
    }
}

/// any pair, any soft hand, or a hard total under 17 may cash out
pub fn may_cash_out(hand: &Hand) -> bool {
    hand.is_pair() || hand.is_soft() || hand.total() < crate::CASHOUT_BELOW
}

/// settlement
impl Round<'_> {
    fn natural(&mut self) -> Settlement {
        let dealer = Hand::from_iter([self.upcard, self.shoe.deal()]);
        match dealer.total() {
            21 => Settlement::from((BASE_BET, BASE_BET)),
            _ => Settlement::from((BASE_BET * crate::NATURAL_RETURN, BASE_BET)),
        }
    }
    fn single(&mut self, hand: Hand) -> Settlement {
        let mut settlement = Settlement::wager(BASE_BET);
        self.resolve(&hand, &mut settlement);
        settlement
    }
    /// one card to each half, both dealt before either is resolved.
    /// a split hand that pairs again cashes out as a pair; no resplits.
    fn split(&mut self, pair: Hand) -> Settlement {
        let mut settlement = Settlement::wager(2.0 * BASE_BET);
        let hands = pair
            .cards()
            .iter()
            .map(|card| Hand::from_iter([*card, self.shoe.deal()]))
            .collect::<Vec<Hand>>();
        for hand in hands.iter() {
            self.resolve(hand, &mut settlement);
        }
        settlement
    }
    fn resolve(&mut self, hand: &Hand, settlement: &mut Settlement) {
        if hand.is_bust() {
            return;
        }
        if may_cash_out(hand) {
            let (amount, cell) = self.table.cashout(hand, self.upcard.value());
            settlement.cash(amount, cell);
        } else {
            let amount = self.showdown(hand.total());
            settlement.win(amount);
        }
    }
    fn showdown(&mut self, player: u8) -> Chips {
        let dealer = self.dealer();
        if dealer > 21 || player > dealer {
            2.0 * BASE_BET
        } else if player == dealer {
            BASE_BET
        } else {
            0.0
        }
    }
    /// hole card and dealer draws for one standing hand
    fn dealer(&mut self) -> u8 {
        let mut dealer = Hand::from_iter([self.upcard, self.shoe.deal()]);
        dealer_play(&mut *self.shoe, &mut dealer)
    }
}

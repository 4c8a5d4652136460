//! Deals shuffled 52-card decks.
//!
//! Usage: `deal [count] [order]`, defaulting to three random shuffles.
use std::{env, fmt, process};

use lazyperm::{permute, Order};

#[derive(Clone, Copy)]
struct Card {
    value: u8,
    suit: u8,
}

const SUITS: [char; 4] = ['\u{2660}', '\u{2665}', '\u{2666}', '\u{2663}'];

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            0 => f.write_str("A")?,
            10 => f.write_str("J")?,
            11 => f.write_str("Q")?,
            12 => f.write_str("K")?,
            value => write!(f, "{}", value + 1)?,
        }
        write!(f, "{}\u{fe0f}", SUITS[self.suit as usize])
    }
}

fn parse_args() -> Result<(usize, Order), String> {
    let mut args = env::args().skip(1);
    let count = match args.next() {
        Some(arg) => arg
            .parse::<usize>()
            .map_err(|err| format!("invalid count `{arg}`: {err}"))?,
        None => 3,
    };
    let order = match args.next() {
        Some(arg) => arg.parse::<Order>().map_err(|err| format!("{err}"))?,
        None => Order::Random,
    };
    Ok((count, order))
}

fn main() {
    let (count, order) = match parse_args() {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("usage: deal [count] [ascending|descending|random]");
            process::exit(2);
        }
    };

    let deck: Vec<Card> = (0..52)
        .map(|i| Card {
            value: i % 13,
            suit: i / 13,
        })
        .collect();

    for shuffle in permute(&deck, order).take(count) {
        let line: Vec<String> = shuffle.iter().map(Card::to_string).collect();
        println!("{}", line.join(" "));
    }
}

//! # Synthetic Data
//!
//! Random catalog records for benchmark runs. Callers pass the RNG so tests
//! can seed it.

use rand::Rng;
use rand::seq::index::sample;
use shelfsort_core::{Book, Member};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn letters<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(LETTERS[rng.gen_range(0..LETTERS.len())]))
        .collect()
}

fn digits<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// `size` books with random 10-letter titles, 8-letter authors, 13-digit
/// ISBNs and random availability. Ids run from 1.
pub fn books<R: Rng>(rng: &mut R, size: usize) -> Vec<Book> {
    (1..=size as u64)
        .map(|id| {
            Book::new(id, letters(rng, 10), letters(rng, 8), digits(rng, 13))
                .with_availability(rng.gen_bool(0.5))
        })
        .collect()
}

/// `size` members with random 8-letter names, 10-digit phone contacts and
/// up to `min(5, size / 10)` distinct borrowed book ids drawn from
/// `1..=size / 2`.
pub fn members<R: Rng>(rng: &mut R, size: usize) -> Vec<Member> {
    let max_loans = (size / 10).min(5);
    let pool = size / 2;

    (1..=size as u64)
        .map(|id| {
            let mut member = Member::new(id, letters(rng, 8), digits(rng, 10));
            let loans = rng.gen_range(0..=max_loans.min(pool));
            for index in sample(rng, pool, loans) {
                member.borrow(index as u64 + 1);
            }
            member
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shelfsort_core::catalog::validate::{validate_contact, validate_isbn};

    #[test]
    fn books_have_requested_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let books = books(&mut rng, 25);

        assert_eq!(books.len(), 25);
        assert_eq!(books[0].book_id, 1);
        assert_eq!(books[24].book_id, 25);
        for book in &books {
            assert_eq!(book.title.len(), 10);
            assert_eq!(book.author.len(), 8);
            assert!(validate_isbn(&book.isbn).is_ok());
        }
    }

    #[test]
    fn members_respect_loan_cap() {
        let mut rng = StdRng::seed_from_u64(11);
        let members = members(&mut rng, 100);

        assert_eq!(members.len(), 100);
        for member in &members {
            assert!(member.borrowed_books.len() <= 5);
            assert!(member.borrowed_books.iter().all(|&id| (1..=50).contains(&id)));
            assert!(validate_contact(&member.contact).is_ok());
        }
    }

    #[test]
    fn loans_are_distinct() {
        let mut rng = StdRng::seed_from_u64(5);
        let members = members(&mut rng, 200);

        for member in &members {
            let mut ids = member.borrowed_books.clone();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), member.borrowed_books.len());
        }
        assert!(members.iter().any(|m| m.borrowed_books.len() == 5));
    }

    #[test]
    fn small_member_sets_have_no_loans() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(members(&mut rng, 5).iter().all(|m| m.borrowed_books.is_empty()));
        assert!(members(&mut rng, 0).is_empty());
    }

    #[test]
    fn same_seed_same_data() {
        let a = books(&mut StdRng::seed_from_u64(42), 10);
        let b = books(&mut StdRng::seed_from_u64(42), 10);
        assert_eq!(a, b);
    }
}

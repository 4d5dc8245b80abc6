use crate::domain::types::{SeatId, SeatNumber};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One seat as observed in a single inventory query
///
/// Seats are owned exclusively by the booking service; this is a snapshot and
/// is never cached across queries, so a stale view can't mask a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub number: SeatNumber,
    pub available: bool,
}

impl Seat {
    pub fn new(id: SeatId, number: SeatNumber, available: bool) -> Self {
        Self {
            id,
            number,
            available,
        }
    }
}

/// Filter a seat snapshot down to available seats and shuffle them.
///
/// The shuffle decorrelates which actor targets which seat first: without it,
/// actors iterating the service's stable listing order would naturally
/// partition the pool instead of racing for the same seats.
pub fn available_in_random_order<R: Rng>(snapshot: Vec<Seat>, rng: &mut R) -> Vec<Seat> {
    let mut open: Vec<Seat> = snapshot.into_iter().filter(|seat| seat.available).collect();
    open.shuffle(rng);
    open
}

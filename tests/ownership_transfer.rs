use std::sync::Arc;

use chrono::{TimeZone, Utc};
use perdure::construct::{
    Birth, Built, Death, Event, EventKind, Individual, Scrapped, SerialGenerator, Started,
    Stopped, TransferredFrom, TransferredTo,
};
use perdure::datatype::{Bound, Timestamp};
use perdure::error::PerdureError;
use perdure::ownership::{transfer_ownership, Owning};

fn day(year: i32, month: u32, day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn person(id: &str, born: Timestamp) -> Arc<Individual<Birth>> {
    let beginning =
        Event::<Birth>::with_bound(format!("{}-born", id), Bound::at(born));
    let ending = Event::<Death>::unknown(format!("{}-died", id));
    Arc::new(Individual::new(id.into(), beginning, ending).unwrap())
}

fn car(id: &str) -> Arc<Individual<Built>> {
    let beginning =
        Event::<Built>::with_bound(format!("{}-built", id), Bound::at(day(1999, 1, 1)));
    let ending = Event::<Scrapped>::unknown(format!("{}-scrapped", id));
    Arc::new(Individual::new(id.into(), beginning, ending).unwrap())
}

fn alice_owns_car(
    alice: &Arc<Individual<Birth>>,
    car: &Arc<Individual<Built>>,
) -> Owning<Birth, Built> {
    let bought = Event::<TransferredFrom>::with_bound(
        "bought1".into(),
        Bound::between(day(2024, 1, 1), day(2024, 1, 2)).unwrap(),
    );
    let sold = Event::<TransferredTo>::unknown("sold1".into());
    Owning::new(
        "aliceOwnsCar".into(),
        "Car purchase".into(),
        Arc::clone(alice),
        Arc::clone(car),
        bought,
        sold,
    )
    .unwrap()
}

#[test]
fn transfer_of_ownership() {
    let generator = SerialGenerator::new("transfer");
    let alice = person("alice", day(1948, 2, 4));
    let bob = person("bob", day(1941, 5, 24));
    let car = car("car");
    let current = alice_owns_car(&alice, &car);

    let start = Event::<Started>::with_bound(
        "transferBegins".into(),
        Bound::at(Utc.with_ymd_and_hms(2024, 11, 11, 0, 0, 0).unwrap()),
    );
    let stop = Event::<Stopped>::with_bound(
        "transferEnds".into(),
        Bound::at(Utc.with_ymd_and_hms(2024, 11, 11, 12, 0, 0).unwrap()),
    );

    let transfer = transfer_ownership(
        &generator,
        "carSoldToBob".into(),
        "Car sold",
        &current,
        Arc::clone(&bob),
        &start,
        &stop,
    )
    .unwrap();

    // the transferred car is re-referenced, never duplicated
    assert!(Arc::ptr_eq(transfer.from().owned(), transfer.to().owned()));
    assert!(Arc::ptr_eq(transfer.from().owned(), &car));
    assert!(Arc::ptr_eq(transfer.from().owner(), &alice));
    assert!(Arc::ptr_eq(transfer.to().owner(), &bob));

    // the superseded ownership keeps its identity and beginning and is
    // closed off at the stop boundary
    assert_eq!(transfer.from().identifier(), "aliceOwnsCar");
    assert_eq!(transfer.from().actions_description(), "Car purchase");
    assert_eq!(transfer.from().beginning(), current.beginning());
    assert_eq!(transfer.from().ending().bound(), stop.bound());
    assert_eq!(transfer.from().ending().kind(), EventKind::TransferredTo);

    // the successor begins at the start boundary and has no known end
    assert_eq!(transfer.to().identifier(), "carSoldToBob");
    assert_eq!(transfer.to().actions_description(), "Car sold");
    assert_eq!(transfer.to().beginning().bound(), start.bound());
    assert_eq!(transfer.to().beginning().kind(), EventKind::TransferredFrom);
    assert!(transfer.to().ending().bound().is_unknown());

    // the transaction's own bounds propagate unchanged from start/stop
    assert_eq!(transfer.beginning().bound(), start.bound());
    assert_eq!(transfer.ending().bound(), stop.bound());

    // the original relation is untouched
    assert!(current.ending().bound().is_unknown());
}

#[test]
fn transfer_before_current_beginning_is_rejected() {
    let generator = SerialGenerator::new("transfer");
    let alice = person("alice", day(1948, 2, 4));
    let bob = person("bob", day(1941, 5, 24));
    let car = car("car");
    let current = alice_owns_car(&alice, &car);

    // transfer activity predates the purchase
    let start = Event::<Started>::with_bound("early".into(), Bound::at(day(2023, 6, 1)));
    let stop = Event::<Stopped>::with_bound("earlyStop".into(), Bound::at(day(2023, 6, 2)));

    let err = transfer_ownership(
        &generator,
        "tooEarly".into(),
        "Car sold",
        &current,
        bob,
        &start,
        &stop,
    )
    .unwrap_err();
    assert!(matches!(err, PerdureError::Ordering(_)));
}

#[test]
fn transfer_with_inverted_activity_is_rejected() {
    let generator = SerialGenerator::new("transfer");
    let alice = person("alice", day(1948, 2, 4));
    let bob = person("bob", day(1941, 5, 24));
    let car = car("car");
    let current = alice_owns_car(&alice, &car);

    let start = Event::<Started>::with_bound("begins".into(), Bound::at(day(2024, 11, 12)));
    let stop = Event::<Stopped>::with_bound("ends".into(), Bound::at(day(2024, 11, 11)));

    let err = transfer_ownership(
        &generator,
        "inverted".into(),
        "Car sold",
        &current,
        bob,
        &start,
        &stop,
    )
    .unwrap_err();
    assert!(matches!(err, PerdureError::Ordering(_)));
}

#[test]
fn transfer_of_already_ended_individual_is_rejected() {
    let generator = SerialGenerator::new("transfer");
    let alice = person("alice", day(1948, 2, 4));
    let bob = person("bob", day(1941, 5, 24));

    // a car scrapped in 2020 cannot change hands in 2024
    let built =
        Event::<Built>::with_bound("built".into(), Bound::at(day(1999, 1, 1)));
    let scrapped =
        Event::<Scrapped>::with_bound("scrapped".into(), Bound::at(day(2020, 1, 1)));
    let wreck = Arc::new(Individual::new("wreck".into(), built, scrapped).unwrap());

    let bought = Event::<TransferredFrom>::with_bound(
        "bought".into(),
        Bound::at(day(2019, 1, 1)),
    );
    let sold = Event::<TransferredTo>::unknown("sold".into());
    let current = Owning::new(
        "aliceOwnsWreck".into(),
        "Car purchase".into(),
        Arc::clone(&alice),
        Arc::clone(&wreck),
        bought,
        sold,
    )
    .unwrap();

    let start = Event::<Started>::with_bound("begins".into(), Bound::at(day(2024, 11, 11)));
    let stop = Event::<Stopped>::with_bound("ends".into(), Bound::at(day(2024, 11, 11)));

    let err = transfer_ownership(
        &generator,
        "tooLate".into(),
        "Car sold",
        &current,
        bob,
        &start,
        &stop,
    )
    .unwrap_err();
    assert!(matches!(err, PerdureError::Ordering(_)));
}

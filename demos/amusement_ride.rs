//! Admitting riders to an amusement ride.
//!
//! Each rider is checked for height and tickets. The boarding pipeline
//! stops at the first failed check; the inspection report runs every check
//! and lists all problems.
//!
//! Run with `cargo run --example amusement_ride`.

use taskwell::control::Either;
use taskwell::effect::runtime::RuntimeConfig;
use taskwell::effect::{Executor, TaskEither};
use taskwell::task_either;

const MINIMUM_HEIGHT: u32 = 150;

#[derive(Debug, Clone)]
struct Rider {
    name: &'static str,
    height: u32,
    tickets: u32,
}

fn check_height(rider: Rider) -> TaskEither<String, Rider> {
    TaskEither::from_predicate(
        rider,
        |rider| rider.height >= MINIMUM_HEIGHT,
        || "height invalid".to_string(),
    )
}

fn check_tickets(rider: Rider) -> TaskEither<String, Rider> {
    TaskEither::from_predicate(rider, |rider| rider.tickets > 0, || "not enough tickets".to_string())
}

fn board(rider: Rider) -> TaskEither<String, Rider> {
    task_either! {
        bind tall_enough = check_height(rider);
        bind ticketed = check_tickets(tall_enough);
        let remaining = ticketed.tickets - 1;
        yield Rider { tickets: remaining, ..ticketed }
    }
}

fn inspect(rider: Rider) -> TaskEither<Vec<String>, Rider> {
    let height = rider.height;
    let tickets = rider.tickets;
    let checks: Vec<Box<dyn FnOnce(&Rider) -> TaskEither<String, ()> + Send>> = vec![
        Box::new(move |_: &Rider| {
            TaskEither::from_predicate((), move |_| height >= MINIMUM_HEIGHT, move || {
                format!("height {height}cm is below {MINIMUM_HEIGHT}cm")
            })
        }),
        Box::new(move |_: &Rider| {
            TaskEither::from_predicate((), move |_| tickets > 0, || "no tickets left".to_string())
        }),
    ];
    TaskEither::validate(rider, checks)
}

fn main() -> std::io::Result<()> {
    let runtime = RuntimeConfig::default()
        .with_worker_threads(2)
        .with_thread_name("ride-checks")
        .build()?;
    let executor = Executor::from_handle(runtime.handle().clone());

    let queue = vec![
        Rider { name: "Ada", height: 170, tickets: 2 },
        Rider { name: "Ben", height: 140, tickets: 2 },
        Rider { name: "Cy", height: 140, tickets: 0 },
    ];

    println!("== boarding ==");
    for rider in queue.clone() {
        let name = rider.name;
        match board(rider).force(&executor) {
            Either::Right(boarded) => {
                println!("{name}: boarded, {} ticket(s) left", boarded.tickets);
            }
            Either::Left(reason) => println!("{name}: turned away ({reason})"),
        }
    }

    println!("== inspection ==");
    let report = TaskEither::sequence_accumulating(queue.into_iter().map(|rider| {
        let name = rider.name;
        inspect(rider).map_left(move |problems| format!("{name}: {}", problems.join("; ")))
    }));
    match report.force(&executor) {
        Either::Right(riders) => println!("all {} riders pass", riders.len()),
        Either::Left(problems) => {
            for problem in problems {
                println!("{problem}");
            }
        }
    }

    Ok(())
}

use sandtime::duration::{days, hours, seconds, weeks};
use sandtime::{
    date, humanize, now, time, Chrono, ClockContext, Easing, FrameLocker, FrameLockerConfig,
    Looper, Timer, Timestamp,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), sandtime::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Current time
    let current = now();
    println!("Now: {}", current);
    println!("Now (long): {}", current.format("d mmmm yyyy, HH:MM"));
    println!("Uptime: {}ms", sandtime::uptime());

    // Calendar literals and parsing
    let eve = date(2010, 12, 31) + time(23, 59, 59, 0);
    println!("New Year's Eve: {}", eve);
    let parsed: Timestamp = "2010-12-31T23:59:59.003Z".parse()?;
    println!("Parsed ISO: {}", parsed);
    println!("Garbage parses to: {}", Timestamp::parse_lossy("garbage"));

    // Humanized offsets
    for delta in [seconds(0), seconds(-1), seconds(-61), hours(-24), days(-14), weeks(-53)] {
        println!("{:>14}ms -> {}", delta, humanize::pretty(delta));
    }
    println!("2025 began {}", date(2025, 1, 1).relative_to(current));

    // Time travel on an explicit clock
    let clock = ClockContext::starting_at(date(1972, 6, 10) + time(17, 0, 0, 0));
    let chrono = Chrono::new(&clock, seconds(10));
    let mut looper = Looper::new(&clock, seconds(3));
    for _ in 0..5 {
        clock.shift(seconds(2));
        println!(
            "{} chrono {:.2} looper {:.2}",
            clock.now(),
            chrono.progress(),
            looper.progress()
        );
    }

    // Easing
    for easing in [Easing::QuadIn, Easing::ElasticOut, Easing::BounceOut] {
        let samples: Vec<String> = (0..=4)
            .map(|i| format!("{:.3}", easing.apply(i as f32 / 4.0)))
            .collect();
        println!("{:<12} {}", easing, samples.join(" "));
    }

    // Frame locking
    let locker = FrameLocker::spawn(FrameLockerConfig::default())?;
    let timer = Timer::start();
    let (mut updates, mut frames) = (0, 0);
    while timer.ms() < 1_000 {
        updates += 1;
        if locker.lock(60) {
            frames += 1;
        }
    }
    println!(
        "{} updates, {} frames, {} fps in {}",
        updates,
        frames,
        locker.fps(),
        timer
    );

    Ok(())
}

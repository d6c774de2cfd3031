use desk_button_service::{sample_task, Config, Controller, GestureKind, InputSource, RawSample};
use embassy_executor::Executor;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::{Duration, Timer};
use log::*;
use static_cell::StaticCell;

const UP: RawSample = RawSample::new(true, false);
const DOWN: RawSample = RawSample::new(false, true);
const BOTH: RawSample = RawSample::new(true, true);
const RELEASED: RawSample = RawSample::RELEASED;

/// One sample per millisecond, 50 ms settle time
const CONFIG: Config = Config::DEFAULT
    .with_sample_rate_hz(1000)
    .with_debounce_threshold(50);

/// Samples of contact chatter at the start of every step
const BOUNCE: u32 = 8;

/// Button presses to replay, durations in milliseconds
const SCRIPT: &[(RawSample, u32)] = &[
    (RELEASED, 300),
    // Single up click
    (UP, 400),
    (RELEASED, 150),
    // Second click inside the window
    (UP, 200),
    (RELEASED, 600),
    // Long down press
    (DOWN, 400),
    (RELEASED, 800),
    // Save hold
    (BOTH, 3500),
    (RELEASED, 500),
];

static GESTURES: Channel<CriticalSectionRawMutex, GestureKind, 4> = Channel::new();

/// Replays `SCRIPT` with chatter at each edge, then stays released
struct ScriptedButtons {
    step: usize,
    elapsed: u32,
    previous: RawSample,
}

impl ScriptedButtons {
    fn new() -> Self {
        Self {
            step: 0,
            elapsed: 0,
            previous: RELEASED,
        }
    }
}

impl InputSource for ScriptedButtons {
    fn sample(&mut self) -> RawSample {
        let Some(&(target, duration)) = SCRIPT.get(self.step) else {
            return RELEASED;
        };

        let raw = if self.elapsed < BOUNCE && self.elapsed % 2 == 1 {
            self.previous
        } else {
            target
        };

        self.elapsed += 1;
        if self.elapsed >= duration {
            self.step += 1;
            self.elapsed = 0;
            self.previous = target;
        }

        raw
    }
}

type GestureSender = Sender<'static, CriticalSectionRawMutex, GestureKind, 4>;

#[embassy_executor::task]
async fn sampler(mut controller: Controller<ScriptedButtons, GestureSender>) {
    sample_task(&mut controller).await
}

#[embassy_executor::task]
async fn motor(receiver: Receiver<'static, CriticalSectionRawMutex, GestureKind, 4>) {
    loop {
        match receiver.receive().await {
            GestureKind::Idle => info!("motor: stop"),
            GestureKind::Up => info!("motor: raise while held"),
            GestureKind::Down => info!("motor: lower while held"),
            GestureKind::DoubleUp => info!("motor: raise to saved high position"),
            GestureKind::DoubleDown => info!("motor: lower to saved low position"),
            GestureKind::Save => info!("motor: store current position"),
        }
    }
}

#[embassy_executor::task]
async fn supervisor() {
    let total: u32 = SCRIPT.iter().map(|(_, ms)| ms).sum();
    Timer::after(Duration::from_millis(total as u64 + 500)).await;
    info!("script finished");
    std::process::exit(0);
}

fn main() {
    env_logger::builder().filter_level(log::LevelFilter::Info).init();

    let controller = match Controller::new(CONFIG, ScriptedButtons::new()) {
        Ok(controller) => controller.with_reporter(GESTURES.sender()),
        Err(e) => {
            error!("invalid button configuration: {}", e);
            std::process::exit(1);
        }
    };

    static EXECUTOR: StaticCell<Executor> = StaticCell::new();
    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        spawner.must_spawn(sampler(controller));
        spawner.must_spawn(motor(GESTURES.receiver()));
        spawner.must_spawn(supervisor());
    });
}

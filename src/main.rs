mod config;
mod error;
mod game;
mod grid;
mod input;
mod shutdown;
mod snake;
mod term;

use std::fs::File;
use std::process::exit;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use log::{error, info};
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use crate::config::GameConfig;
use crate::error::SnakeError;
use crate::game::SnakeGame;
use crate::shutdown::ShutdownSignal;

const LOG_FILE: &str = "termsnake.log";

fn main() {
    if let Err(err) = run() {
        error!("fatal: {}", err);
        eprintln!("termsnake: {}", err);
        exit(1);
    }
}

fn run() -> Result<(), SnakeError> {
    let conf = GameConfig::parse();

    // Stdout belongs to the game surface, so logs go to a file.
    WriteLogger::init(LevelFilter::Info, LogConfig::default(), File::create(LOG_FILE)?)?;
    conf.validate()?;
    info!("starting up: {:?}", conf);

    let shutdown = ShutdownSignal::new();
    let (sender, receiver) = mpsc::channel();

    let listener_shutdown = shutdown.clone();
    let listener = thread::spawn(move || input::listen(sender, listener_shutdown));

    let loop_conf = conf;
    let loop_shutdown = shutdown.clone();
    let game_loop = thread::spawn(move || {
        let (mut display, bounds) = term::setup(&loop_conf)?;
        SnakeGame::new(&loop_conf, bounds, receiver, loop_shutdown).run(&mut *display)
    });

    let game_result = game_loop.join();
    // The game thread signals on its way out. Signalling again here
    // covers a panicked thread, so the listener still stops.
    shutdown.signal();
    let listener_result = listener.join();

    let score = match game_result {
        Ok(result) => result?,
        Err(_) => return Err(SnakeError::ThreadPanic("game loop")),
    };
    match listener_result {
        Ok(result) => result?,
        Err(_) => return Err(SnakeError::ThreadPanic("input listener")),
    }

    info!("final score {}", score);
    println!("GAME OVER");
    println!("SCORE : {}", score);
    Ok(())
}

//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

// This is the CLI version of RZBD. One `from-*` and one `to-*` command per
// container family, except messages, which only extract.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::error;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use std::path::PathBuf;
use std::process::exit;

mod commands;

//---------------------------------------------------------------------------//
//                              CLI definition
//---------------------------------------------------------------------------//

#[derive(Parser)]
#[command(name = "rzbd", version, about = "Extract and repack the game's ZBD files, bit for bit.")]
struct Cli {

    /// Sets the level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct IoArgs {

    /// Path of the file to convert.
    input: PathBuf,

    /// Path of the output file. Derived from the input if not set.
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {

    /// Extracts a sounds archive to a ZIP of WAV files.
    #[command(name = "from-sounds")]
    FromSounds(IoArgs),

    /// Repacks a ZIP of WAV files into a sounds archive.
    #[command(name = "to-sounds")]
    ToSounds(IoArgs),

    /// Extracts an interpreter archive to JSON.
    #[command(name = "from-interp")]
    FromInterp(IoArgs),

    /// Repacks JSON into an interpreter archive.
    #[command(name = "to-interp")]
    ToInterp(IoArgs),

    /// Extracts a reader archive to a ZIP of JSON trees.
    #[command(name = "from-reader")]
    FromReader(IoArgs),

    /// Repacks a ZIP of JSON trees into a reader archive.
    #[command(name = "to-reader")]
    ToReader(IoArgs),

    /// Extracts a mechlib archive to a ZIP of JSON models and materials.
    #[command(name = "from-mechlib")]
    FromMechlib(IoArgs),

    /// Repacks a mechlib ZIP into a mechlib archive.
    #[command(name = "to-mechlib")]
    ToMechlib(IoArgs),

    /// Extracts a motion archive to a ZIP of JSON motions.
    #[command(name = "from-motion")]
    FromMotion(IoArgs),

    /// Repacks a motion ZIP into a motion archive.
    #[command(name = "to-motion")]
    ToMotion(IoArgs),

    /// Extracts a GameZ level to a ZIP of JSON documents.
    #[command(name = "from-gamez")]
    FromGamez(IoArgs),

    /// Repacks a GameZ ZIP into a GameZ level.
    #[command(name = "to-gamez")]
    ToGamez(IoArgs),

    /// Extracts an anim file to a ZIP of JSON animation definitions.
    #[command(name = "from-anim")]
    FromAnim(IoArgs),

    /// Repacks an anim ZIP into an anim file.
    #[command(name = "to-anim")]
    ToAnim(IoArgs),

    /// Extracts a texture archive to a ZIP of PNG images.
    #[command(name = "from-textures")]
    FromTextures {
        #[command(flatten)]
        io: IoArgs,

        /// Stretch images per their stretch code. Purely visual; repacking
        /// needs unstretched images.
        #[arg(long)]
        stretch: bool,
    },

    /// Repacks a ZIP of PNG images into a texture archive.
    #[command(name = "to-textures")]
    ToTextures(IoArgs),

    /// Extracts the localized messages from the game's message DLL.
    #[command(name = "from-messages")]
    FromMessages {
        #[command(flatten)]
        io: IoArgs,

        /// Locale to extract: English (1033), German (1031), French (1036).
        #[arg(long, default_value_t = 1033)]
        locale_id: u32,
    },
}

//---------------------------------------------------------------------------//
//                                  Main
//---------------------------------------------------------------------------//

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);

    match run(cli.command) {
        Ok(()) => exit(0),
        Err(error) => {
            error!("{error}");
            exit(1)
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::FromSounds(io) => commands::sounds::from_zbd(&io.input, io.output.as_deref()),
        Commands::ToSounds(io) => commands::sounds::to_zbd(&io.input, io.output.as_deref()),
        Commands::FromInterp(io) => commands::interp::from_zbd(&io.input, io.output.as_deref()),
        Commands::ToInterp(io) => commands::interp::to_zbd(&io.input, io.output.as_deref()),
        Commands::FromReader(io) => commands::reader::from_zbd(&io.input, io.output.as_deref()),
        Commands::ToReader(io) => commands::reader::to_zbd(&io.input, io.output.as_deref()),
        Commands::FromMechlib(io) => commands::mechlib::from_zbd(&io.input, io.output.as_deref()),
        Commands::ToMechlib(io) => commands::mechlib::to_zbd(&io.input, io.output.as_deref()),
        Commands::FromMotion(io) => commands::motion::from_zbd(&io.input, io.output.as_deref()),
        Commands::ToMotion(io) => commands::motion::to_zbd(&io.input, io.output.as_deref()),
        Commands::FromGamez(io) => commands::gamez::from_zbd(&io.input, io.output.as_deref()),
        Commands::ToGamez(io) => commands::gamez::to_zbd(&io.input, io.output.as_deref()),
        Commands::FromAnim(io) => commands::anim::from_zbd(&io.input, io.output.as_deref()),
        Commands::ToAnim(io) => commands::anim::to_zbd(&io.input, io.output.as_deref()),
        Commands::FromTextures { io, stretch } => commands::textures::from_zbd(&io.input, io.output.as_deref(), stretch),
        Commands::ToTextures(io) => commands::textures::to_zbd(&io.input, io.output.as_deref()),
        Commands::FromMessages { io, locale_id } => commands::messages::from_dll(&io.input, io.output.as_deref(), locale_id),
    }
}

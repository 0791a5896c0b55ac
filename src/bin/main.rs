#[macro_use]
extern crate log;

use std::env;
use std::io::{IsTerminal, Write};

use clap::Parser;
use color_eyre::eyre::Result;
use dropsel::prelude::*;

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // downstream pipe closed, exit silently
            if err
                .downcast_ref::<std::io::Error>()
                .is_some_and(|e| e.kind() == std::io::ErrorKind::BrokenPipe)
            {
                std::process::exit(0)
            }
            error!("{err:?}");
            eprintln!("dropsel: {err}");
            std::process::exit(2)
        }
    }
}

fn parse_args() -> SelectOptions {
    let mut args = Vec::new();

    args.push(env::args().next().unwrap_or_else(|| String::from("dropsel")));
    args.extend(
        env::var("DROPSEL_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    args.extend(env::args().skip(1));

    SelectOptions::parse_from(args).build()
}

fn read_choices(opts: &SelectOptions) -> Result<Vec<SelectOption>> {
    let reader = OptionReader::from_options(opts);
    if !opts.choices.is_empty() {
        return Ok(reader.of_args(opts.choices.as_slice())?);
    }
    if std::io::stdin().is_terminal() {
        debug!("stdin is a terminal, no options to read");
        return Ok(Vec::new());
    }
    Ok(reader.read(std::io::stdin().lock())?)
}

fn real_main() -> Result<i32> {
    let opts = parse_args();

    if let Some(shell) = &opts.shell {
        dropsel::completions::generate(shell);
        return Ok(0);
    }

    //------------------------------------------------------------------------------
    let choices = read_choices(&opts)?;
    let output_ending = if opts.print0 { "\0" } else { "\n" };
    let print_label = opts.print_label;

    let output = Dropsel::run_with(opts, choices)?;

    //------------------------------------------------------------------------------
    // output
    if output.is_abort {
        return Ok(130);
    }

    let printed = if print_label { output.label } else { output.value };
    let Some(printed) = printed else {
        return Ok(1);
    };

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{printed}{output_ending}")?;
    stdout.flush()?;

    Ok(0)
}

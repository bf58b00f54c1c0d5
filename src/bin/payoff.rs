//! Interactive payoff CLI.
//!
//! A REPL for building a portfolio and watching its payoff profile change.
//!
//! Usage:
//!   cargo run --bin payoff
//!   payoff  (if installed via cargo install)

use nanopayoff::{
    Direction, EngineConfig, OptionType, PayoffCurve, PayoffEngine, PayoffReport, Portfolio,
    Position,
};
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let mut portfolio = Portfolio::new();
    let mut engine = PayoffEngine::default();

    println!("Payoff CLI v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("payoff> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts.first().map(|s| s.to_lowercase());

        match cmd.as_deref() {
            Some("help" | "h" | "?") => print_help(),
            Some("quit" | "exit" | "q") => break,
            Some("stock") => handle_stock(&mut portfolio, &engine, &parts[1..]),
            Some("call") => handle_option(&mut portfolio, &engine, OptionType::Call, &parts[1..]),
            Some("put") => handle_option(&mut portfolio, &engine, OptionType::Put, &parts[1..]),
            Some("remove" | "rm") => handle_remove(&mut portfolio, &engine, &parts[1..]),
            Some("list" | "ls" | "l") => print_positions(&portfolio),
            Some("bounds" | "b") => print_bounds(&portfolio, &engine),
            Some("curve" | "c") => print_curve(&portfolio, &engine),
            Some("segments" | "s") => print_segments(&portfolio, &engine),
            Some("margin" | "m") => handle_margin(&mut engine, &portfolio, &parts[1..]),
            Some("clear") => {
                portfolio.clear();
                println!("Portfolio cleared.");
            }
            Some(cmd) => println!("Unknown command: '{}'. Type 'help' for commands.", cmd),
            None => {}
        }
    }

    println!("Goodbye!");
}

fn print_help() {
    println!(
        r#"
Commands:
  stock <buy|sell> <price> [ticker]              Add a stock position
  call <buy|sell> <strike> <premium> [ticker]    Add a call option
  put <buy|sell> <strike> <premium> [ticker]     Add a put option
  remove <index>                                 Remove a position
  list                                           Show positions
  bounds                                         Show the evaluation range
  curve                                          Show the aggregate payoff
  segments                                       Show each position's line
  margin [value]                                 Show or set the range margin
  clear                                          Remove every position
  help                                           Show this help
  quit                                           Exit

Examples:
  stock buy 100                                  Long stock bought @ $100
  call buy 50 2                                  Long 50 call, $2 premium
  put sell 50 3 XYZ                              Short 50 put, $3 premium
  remove 0                                       Remove the first position
"#
    );
}

fn handle_stock(portfolio: &mut Portfolio, engine: &PayoffEngine, args: &[&str]) {
    if args.len() < 2 {
        println!("Usage: stock <buy|sell> <price> [ticker]");
        return;
    }

    let direction: Direction = match args[0].parse() {
        Ok(d) => d,
        Err(e) => {
            println!("{e}");
            return;
        }
    };

    let Some(price) = parse_number(args[1]) else {
        println!("Invalid price: '{}'", args[1]);
        return;
    };

    match Position::stock(direction, price) {
        Ok(pos) => add_position(portfolio, engine, pos, args.get(2)),
        Err(e) => println!("Rejected: {e}"),
    }
}

fn handle_option(
    portfolio: &mut Portfolio,
    engine: &PayoffEngine,
    option_type: OptionType,
    args: &[&str],
) {
    if args.len() < 3 {
        println!(
            "Usage: {} <buy|sell> <strike> <premium> [ticker]",
            option_type.to_string().to_lowercase()
        );
        return;
    }

    let direction: Direction = match args[0].parse() {
        Ok(d) => d,
        Err(e) => {
            println!("{e}");
            return;
        }
    };

    let Some(strike) = parse_number(args[1]) else {
        println!("Invalid strike: '{}'", args[1]);
        return;
    };

    let Some(premium) = parse_number(args[2]) else {
        println!("Invalid premium: '{}'", args[2]);
        return;
    };

    match Position::option(direction, option_type, strike, premium) {
        Ok(pos) => add_position(portfolio, engine, pos, args.get(3)),
        Err(e) => println!("Rejected: {e}"),
    }
}

fn add_position(
    portfolio: &mut Portfolio,
    engine: &PayoffEngine,
    position: Position,
    ticker: Option<&&str>,
) {
    let position = match ticker {
        Some(t) => position.with_ticker(*t),
        None => position,
    };
    println!("Added #{}: {}", portfolio.len(), describe(&position));
    portfolio.push(position);
    print_summary(portfolio, engine);
}

fn handle_remove(portfolio: &mut Portfolio, engine: &PayoffEngine, args: &[&str]) {
    if args.is_empty() {
        println!("Usage: remove <index>");
        return;
    }

    let index: usize = match args[0].parse() {
        Ok(i) => i,
        Err(_) => {
            println!("Invalid index: '{}'", args[0]);
            return;
        }
    };

    match portfolio.remove(index) {
        Some(pos) => {
            println!("Removed #{}: {}", index, describe(&pos));
            if !portfolio.is_empty() {
                print_summary(portfolio, engine);
            }
        }
        None => println!("No position #{} ({} held)", index, portfolio.len()),
    }
}

fn handle_margin(engine: &mut PayoffEngine, portfolio: &Portfolio, args: &[&str]) {
    let Some(arg) = args.first() else {
        println!("Margin: {}", engine.config().margin);
        return;
    };

    let Some(margin) = parse_number(arg) else {
        println!("Invalid margin: '{}'", arg);
        return;
    };

    match PayoffEngine::new(EngineConfig::with_margin(margin)) {
        Ok(e) => {
            *engine = e;
            println!("Margin set to {margin}.");
            if !portfolio.is_empty() {
                print_summary(portfolio, engine);
            }
        }
        Err(e) => println!("Rejected: {e}"),
    }
}

fn print_positions(portfolio: &Portfolio) {
    if portfolio.is_empty() {
        println!("No positions.");
        return;
    }

    println!();
    println!("  POSITIONS ({})", portfolio.len());
    println!("  ──────────────────────────────────────────");
    for (i, pos) in portfolio.iter().enumerate() {
        println!("  {:>3}  {}", i, describe(pos));
    }
    println!();
}

fn print_bounds(portfolio: &Portfolio, engine: &PayoffEngine) {
    match nanopayoff::resolve_bounds(portfolio, engine.config().margin) {
        Ok(bounds) => println!("Bounds: ${:.2} .. ${:.2}", bounds.low(), bounds.high()),
        Err(e) => println!("{e}"),
    }
}

fn print_curve(portfolio: &Portfolio, engine: &PayoffEngine) {
    let Some(report) = compute(portfolio, engine) else {
        return;
    };

    println!();
    println!("  AGGREGATE PAYOFF");
    println!("  ──────────────────────────────");
    print_points(&report.aggregate_curve);

    let break_evens = report.break_evens();
    if break_evens.is_empty() {
        println!("  break-even: none");
    } else {
        let prices: Vec<String> = break_evens.iter().map(|p| format!("${p:.2}")).collect();
        println!("  break-even: {}", prices.join(", "));
    }
    if let Some((lo, hi)) = report.aggregate_curve.profit_range() {
        println!("  max loss: {lo:.2}   max profit: {hi:.2}");
    }
    println!();
}

fn print_segments(portfolio: &Portfolio, engine: &PayoffEngine) {
    let Some(report) = compute(portfolio, engine) else {
        return;
    };

    println!();
    for (i, (pos, segment)) in portfolio
        .iter()
        .zip(report.per_position_segments.iter())
        .enumerate()
    {
        println!("  #{} {}", i, describe(pos));
        print_points(segment);
    }
    println!();
}

fn print_summary(portfolio: &Portfolio, engine: &PayoffEngine) {
    let Some(report) = compute(portfolio, engine) else {
        return;
    };
    let points: Vec<String> = report
        .aggregate_curve
        .iter()
        .map(|p| format!("{:.2}→{:+.2}", p.price, p.profit))
        .collect();
    println!(
        "  bounds ${:.2} .. ${:.2}  |  {}",
        report.bounds.low(),
        report.bounds.high(),
        points.join("  ")
    );
}

fn print_points(curve: &PayoffCurve) {
    for p in curve {
        println!("  ${:>9.2}  {:>+10.2}", p.price, p.profit);
    }
}

fn compute(portfolio: &Portfolio, engine: &PayoffEngine) -> Option<PayoffReport> {
    match engine.compute(portfolio) {
        Ok(report) => Some(report),
        Err(e) => {
            println!("{e}");
            None
        }
    }
}

fn describe(pos: &Position) -> String {
    let label = if pos.ticker().is_empty() {
        String::new()
    } else {
        format!(" {}", pos.ticker())
    };
    match pos.instrument() {
        nanopayoff::Instrument::Stock => {
            format!("{}{} STOCK @ ${:.2}", pos.direction(), label, pos.reference_price())
        }
        nanopayoff::Instrument::Option {
            option_type,
            strike,
        } => format!(
            "{}{} {} K=${:.2} premium ${:.2}",
            pos.direction(),
            label,
            option_type,
            strike,
            pos.reference_price()
        ),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let f: f64 = s.trim_start_matches('$').parse().ok()?;
    f.is_finite().then_some(f)
}

//! The `carryquiz practice` command: an interactive quiz in the terminal.
//!
//! Runs a [`Session`] through practice, review and results, reading one line
//! of input per step. End of input ends the quiz at any point.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use anyhow::Result;

use carryquiz_core::digits::DigitEntry;
use carryquiz_core::error::SessionError;
use carryquiz_core::model::{Configuration, OperationType, Problem};
use carryquiz_core::scoring::is_correct;
use carryquiz_core::session::{Phase, Session};
use carryquiz_core::source::NumberSource;

use crate::commands::rng_from_seed;
use crate::config::QuizArgs;

const PRACTICE_HELP: &str =
    "Comandos: :n siguiente, :p anterior, :g N ir a la N, :m marcar, :r repasar, :s empezar de nuevo, :q salir";

/// Line-based terminal I/O.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// What the learner is told while practising and reviewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    /// Say right away whether each submitted answer was correct.
    pub immediate: bool,
    /// Show right/wrong marks and the running score on the review screen.
    pub in_review: bool,
}

impl Default for Feedback {
    fn default() -> Self {
        Self {
            immediate: true,
            in_review: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn execute(args: QuizArgs, no_feedback: bool, hide_review_results: bool) -> Result<()> {
    let settings = args.resolve()?;
    let configuration = settings.configuration()?;
    let mut rng = rng_from_seed(args.seed);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    let feedback = Feedback {
        immediate: settings.feedback && !no_feedback,
        in_review: settings.show_results_in_review && !hide_review_results,
    };
    run(&mut console, configuration, feedback, &mut rng)
}

/// Drive a whole session until the learner quits or input runs out.
pub fn run<R, W, S>(
    console: &mut Console<R, W>,
    configuration: Configuration,
    feedback: Feedback,
    source: &mut S,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    S: NumberSource + ?Sized,
{
    let mut session = Session::new();
    let mut defaults = configuration;
    session.start(configuration, source)?;
    console.say("¡A practicar!")?;
    console.say(PRACTICE_HELP)?;

    loop {
        let flow = match session.phase() {
            Phase::Configuring => configure_step(console, &mut session, &mut defaults, source)?,
            Phase::Practicing => practice_step(console, &mut session, feedback.immediate)?,
            Phase::Reviewing => review_step(console, &mut session, feedback.in_review)?,
            Phase::ShowingResults => results_step(console, &mut session, source)?,
        };
        if flow == Flow::Quit {
            break;
        }
    }

    let summary = session.summary();
    tracing::info!(
        correct = summary.correct_count,
        total = summary.total_count,
        rounds = session.round(),
        "quiz ended"
    );
    console.say("¡Hasta pronto!")?;
    Ok(())
}

fn answer_width(session: &Session) -> usize {
    session
        .config()
        .map(Configuration::answer_width)
        .unwrap_or(2)
}

/// The problem stacked in columns, operands right-aligned.
fn column_lines(problem: &Problem, width: usize) -> [String; 3] {
    [
        format!(" {:>width$}", problem.operand1),
        format!("{}{:>width$}", problem.operator, problem.operand2),
        "-".repeat(width + 1),
    ]
}

/// Digits of an answer with the blanks squeezed out, or `N/A`.
fn shown_answer(problem: &Problem) -> String {
    match problem.user_answer.as_deref() {
        Some(a) if problem.is_answered() => a.chars().filter(|c| !c.is_whitespace()).collect(),
        _ => "N/A".to_string(),
    }
}

fn practice_step<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut Session,
    feedback: bool,
) -> Result<Flow> {
    let width = answer_width(session);
    let total = session.problems().len();
    let Some(problem) = session.current_problem().cloned() else {
        session.go_to_review()?;
        return Ok(Flow::Continue);
    };

    console.say("")?;
    let mark = if problem.marked_for_review {
        " (marcada)"
    } else {
        ""
    };
    console.say(format!("Operación {} / {}{mark}", problem.id + 1, total))?;
    for line in column_lines(&problem, width) {
        console.say(line)?;
    }
    if let Some(previous) = problem.user_answer.as_deref() {
        console.say(format!(
            "Tu respuesta: {}",
            DigitEntry::from_answer(width, Some(previous))
        ))?;
    }

    let Some(line) = console.ask("Respuesta: ")? else {
        return Ok(Flow::Quit);
    };
    let line = line.trim();

    if let Some(command) = line.strip_prefix(':') {
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("n"), None) => session.next()?,
            (Some("p"), None) => session.previous()?,
            (Some("g"), Some(n)) => match problem_id(n) {
                Some(index) if index < total => session.go_to(index)?,
                _ => console.say(format!("No existe la operación {n}"))?,
            },
            (Some("m"), None) => {
                let marked = session.toggle_mark(problem.id)?;
                console.say(if marked { "Marcada" } else { "Desmarcada" })?;
            }
            (Some("r"), None) => session.go_to_review()?,
            (Some("s"), None) => session.start_over(),
            (Some("q"), None) => return Ok(Flow::Quit),
            _ => console.say(PRACTICE_HELP)?,
        }
        return Ok(Flow::Continue);
    }

    let Some(entry) = DigitEntry::from_typed(width, line) else {
        console.say(format!("Escribe solo números, como mucho {width} cifras."))?;
        return Ok(Flow::Continue);
    };
    match session.submit_answer(&entry.answer().unwrap_or_default()) {
        Ok(outcome) => {
            if feedback {
                console.say(if outcome.correct {
                    "¡Correcto!"
                } else {
                    "Incorrecto"
                })?;
            }
            if outcome.finished {
                console.say("¡Terminado! Vamos a repasar.")?;
            }
        }
        Err(SessionError::EmptyAnswer) => console.say("Escribe una respuesta.")?,
        Err(e) => return Err(e.into()),
    }
    Ok(Flow::Continue)
}

fn print_review<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session,
    show_results: bool,
) -> Result<()> {
    let width = answer_width(session);
    let summary = session.summary();

    console.say("")?;
    console.say("Repasa y corrige")?;
    console.say("¡Puedes cambiar tus respuestas antes de ver la nota!")?;
    if show_results {
        console.say(format!(
            "Nota provisional: {} / {}",
            summary.correct_count, summary.total_count
        ))?;
    }
    for p in session.problems() {
        let entry = DigitEntry::from_answer(width, p.user_answer.as_deref());
        let result = match (show_results && p.user_answer.is_some(), is_correct(p)) {
            (false, _) => " ",
            (true, true) => "✓",
            (true, false) => "✗",
        };
        let mark = if p.marked_for_review { " *" } else { "" };
        console.say(format!(
            "{:>3}. {} = {entry} {result}{mark}",
            p.id + 1,
            p.expression()
        ))?;
    }
    Ok(())
}

/// Problem id from a 1-based number typed by the learner.
fn problem_id(n: &str) -> Option<usize> {
    n.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}

fn review_step<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut Session,
    show_results: bool,
) -> Result<Flow> {
    print_review(console, session, show_results)?;
    let width = answer_width(session);

    let Some(line) = console.ask("Cambia (N RESPUESTA), borra (N), marca (m N) o 'listo': ")? else {
        return Ok(Flow::Quit);
    };
    let words: Vec<&str> = line.split_whitespace().collect();

    let result = match words.as_slice() {
        ["listo" | "done"] => session.finish_review(),
        [":q" | "salir" | "quit"] => return Ok(Flow::Quit),
        ["m", n] => match problem_id(n) {
            Some(id) => session.toggle_mark(id).map(|_| ()),
            None => Err(SessionError::UnknownProblem(0)),
        },
        [n] => match problem_id(n) {
            Some(id) => session.update_answer(id, None),
            None => {
                console.say("No entiendo. Escribe 'listo' para ver tu nota.")?;
                return Ok(Flow::Continue);
            }
        },
        [n, rest @ ..] => {
            let typed = rest.join(" ");
            match (problem_id(n), DigitEntry::from_typed(width, &typed)) {
                (Some(id), Some(entry)) => session.update_answer(id, entry.answer().as_deref()),
                (Some(_), None) => {
                    console.say(format!("Escribe solo números, como mucho {width} cifras."))?;
                    return Ok(Flow::Continue);
                }
                (None, _) => Err(SessionError::UnknownProblem(0)),
            }
        }
        [] => return Ok(Flow::Continue),
    };

    match result {
        Ok(()) => {}
        Err(SessionError::UnknownProblem(_)) => {
            console.say("Esa operación no existe.")?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(Flow::Continue)
}

fn results_step<R, W, S>(
    console: &mut Console<R, W>,
    session: &mut Session,
    source: &mut S,
) -> Result<Flow>
where
    R: BufRead,
    W: Write,
    S: NumberSource + ?Sized,
{
    let summary = session.summary();

    console.say("")?;
    console.say("Tus resultados")?;
    console.say(summary.encouragement().message())?;
    console.say(format!(
        "Aciertos: {} / {}   Nota: {}",
        summary.correct_count,
        summary.total_count,
        summary.score()
    ))?;
    for p in session.problems() {
        let line = format!("{} = {}", p.expression(), p.correct_answer());
        if is_correct(p) {
            console.say(format!("  ✓ {line}"))?;
        } else {
            console.say(format!("  ✗ {line}   Tu respuesta: {}", shown_answer(p)))?;
        }
    }

    let prompt = if summary.is_perfect() {
        "'retry' para operaciones nuevas, 'new' para cambiar la configuración, 'quit' para salir: "
    } else {
        "'retry' para repetir los fallos, 'new' para cambiar la configuración, 'quit' para salir: "
    };
    let Some(line) = console.ask(prompt)? else {
        return Ok(Flow::Quit);
    };

    match line.trim().to_lowercase().as_str() {
        "retry" | "reintentar" => {
            session.retry_incorrect(source)?;
            console.say(format!("Ronda {}: ¡a por ello!", session.round()))?;
        }
        "new" | "nuevo" => session.start_over(),
        "quit" | "salir" | ":q" => return Ok(Flow::Quit),
        _ => console.say("No entiendo.")?,
    }
    Ok(Flow::Continue)
}

/// Ask for a value, keeping `current` when the line is blank and asking again
/// when it does not parse. `None` at end of input.
fn ask_setting<R, W, T, F>(
    console: &mut Console<R, W>,
    question: &str,
    current: T,
    parse: F,
) -> Result<Option<T>>
where
    R: BufRead,
    W: Write,
    T: Display,
    F: Fn(&str) -> Option<T>,
{
    loop {
        let Some(line) = console.ask(&format!("{question} [{current}]: "))? else {
            return Ok(None);
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(Some(current));
        }
        match parse(line) {
            Some(value) => return Ok(Some(value)),
            None => console.say("Valor no válido.")?,
        }
    }
}

fn parse_yes_no(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "s" | "si" | "sí" | "y" | "yes" | "true" => Some(true),
        "n" | "no" | "false" => Some(false),
        _ => None,
    }
}

fn configure_step<R, W, S>(
    console: &mut Console<R, W>,
    session: &mut Session,
    defaults: &mut Configuration,
    source: &mut S,
) -> Result<Flow>
where
    R: BufRead,
    W: Write,
    S: NumberSource + ?Sized,
{
    console.say("")?;
    console.say("Configura tu juego")?;

    let Some(max_digits) = ask_setting(
        console,
        "Máximo número de dígitos",
        defaults.max_digits,
        |s| s.parse().ok(),
    )?
    else {
        return Ok(Flow::Quit);
    };
    let Some(num_problems) = ask_setting(
        console,
        "Número de operaciones",
        defaults.num_problems,
        |s| s.parse().ok(),
    )?
    else {
        return Ok(Flow::Quit);
    };
    let Some(operation_type) = ask_setting(
        console,
        "Tipo de operación (suma, resta, mezcla)",
        defaults.operation_type,
        |s| s.parse::<OperationType>().ok(),
    )?
    else {
        return Ok(Flow::Quit);
    };
    let force_default = if defaults.force_carry { "sí" } else { "no" };
    let Some(force_carry) = ask_setting(
        console,
        "Forzar llevadas y restas prestando (sí/no)",
        force_default.to_string(),
        |s| parse_yes_no(s).map(|b| if b { "sí" } else { "no" }.to_string()),
    )?
    else {
        return Ok(Flow::Quit);
    };

    let configuration = Configuration {
        max_digits,
        num_problems,
        operation_type,
        force_carry: force_carry == "sí",
    };
    match session.start(configuration, source) {
        Ok(()) => {
            *defaults = configuration;
            console.say("¡A practicar!")?;
        }
        Err(SessionError::InvalidConfiguration(e)) => console.say(format!("Error: {e}"))?,
        Err(e) => return Err(e.into()),
    }
    Ok(Flow::Continue)
}

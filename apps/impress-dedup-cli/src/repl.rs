//! Interactive command loop over a [`Session`].

use std::io::{self, BufRead, IsTerminal, Write};

use impress_dedup::{parse_command, Outcome, Session};

/// Read commands from `input` until `quit` or end of input.
///
/// Command failures are reported on `errors` and the loop continues.
pub fn run<R, W, E>(
    session: &mut Session,
    input: R,
    output: &mut W,
    errors: &mut E,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(errors, "Error: {}", e)?;
                continue;
            }
        };

        match session.execute(command) {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => writeln!(output, "{}", outcome)?,
            Err(e) => writeln!(errors, "Error: {}", e)?,
        }
        output.flush()?;
    }
    Ok(())
}

/// Run the loop on the process's stdin, stdout and stderr.
pub fn run_stdio(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("imdedup interactive session, 'help' lists commands");
    }
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    run(session, stdin.lock(), &mut stdout, &mut stderr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(script: &str) -> (Session, String, String) {
        let mut session = Session::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(&mut session, script.as_bytes(), &mut out, &mut err).unwrap();
        (
            session,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let (_, out, err) = drive("bogus\nsets\n");
        assert!(err.contains("unknown command"));
        assert!(out.contains("No result sets"));
    }

    #[test]
    fn out_of_range_threshold_is_reported() {
        let (session, out, err) = drive("cluster 500\nblanket ref.txt -20\n");
        assert_eq!(err.matches("threshold must be between 0 and 100").count(), 2);
        assert!(out.is_empty());
        assert!(session.names().is_empty());
    }

    #[test]
    fn quit_stops_reading() {
        let (session, out, _) = drive("quit\ncluster\n");
        assert!(out.is_empty());
        assert!(session.names().is_empty());
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        let (_, out, err) = drive("\n# nothing here\n   \n");
        assert!(out.is_empty());
        assert!(err.is_empty());
    }
}

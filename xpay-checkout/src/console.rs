//! Terminal stand-in for the in-app authorization web view.

use std::io::{self, BufRead, Write};

use url::Url;
use xpay_http::{RedirectHandler, RedirectSession};

/// Shows the authorization URL on stderr and treats the next line on stdin
/// as the payer closing the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRedirect;

impl RedirectHandler for ConsoleRedirect {
    fn present(&self, url: &Url) -> RedirectSession {
        let (notifier, session) = RedirectSession::channel();
        notifier.load_started(url.clone());

        let url = url.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = write_prompt(&mut io::stderr().lock(), &url) {
                tracing::warn!(error = %e, %url, "Could not show the authorization prompt");
            }

            let mut line = String::new();
            if let Err(e) = io::stdin().lock().read_line(&mut line) {
                tracing::warn!(error = %e, "Could not read from stdin; treating page as closed");
            }
            notifier.dismiss();
        });

        session
    }
}

fn write_prompt<W: Write>(out: &mut W, url: &Url) -> io::Result<()> {
    write!(
        out,
        "\nOpen this page to authorize the payment:\n\n    {url}\n\nPress Enter when you are done...\n"
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn prompt_shows_url() {
        let url = Url::parse("https://staging.xpay.app/pay/3ds/b7a1c2d3").unwrap();
        let mut out = Vec::new();
        write_prompt(&mut out, &url).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("    https://staging.xpay.app/pay/3ds/b7a1c2d3\n"));
        assert!(text.ends_with("Press Enter when you are done...\n"));
    }

    #[test]
    fn prompt_reports_closed_output() {
        let url = Url::parse("https://staging.xpay.app/pay/3ds/b7a1c2d3").unwrap();
        let err = write_prompt(&mut ClosedPipe, &url).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}

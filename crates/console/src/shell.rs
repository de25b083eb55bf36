//! Interactive menu loop.
//!
//! For each round the shell:
//! 1. Prints the menu and the prompt.
//! 2. Reads one choice line, then any follow-up line the action needs.
//! 3. Dispatches to the [`Session`] and prints the result.
//!
//! Crypto failures are printed and the loop continues. The loop ends on
//! `4`, or when input is exhausted.
//!
//! Input arrives over a channel fed by [`spawn_line_reader`]. The blocking
//! read lives on its own OS thread, so dropping the shell future never waits
//! for a pending line.

use std::io::BufRead;
use std::str::FromStr;

use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::session::Session;

const MENU: &str = "\nMenu:\n\
1. Encrypt - Encrypt a message using AES and ChaCha20 algorithms.\n\
2. Decrypt - Decrypt a message previously encrypted with AES and ChaCha20.\n\
3. Algorithm Explanations - Short descriptions of the algorithms and terms used.\n\
4. Quit - Exit the program.\n";

const EXPLANATIONS: &str = "\nAlgorithm Explanations:\n\
1. AES - Symmetric block cipher. This tool uses a 256-bit key on 16-byte blocks.\n\
2. ChaCha20 - Stream cipher. XORs a keystream derived from a 256-bit key and a nonce.\n\
3. Initialization Vector (IV) - 16 random bytes per message so equal plaintexts encrypt differently.\n\
4. Padding - PKCS#7 bytes appended so the plaintext fills whole AES blocks.\n\
5. CBC (Cipher Block Chaining) - Each plaintext block is mixed with the previous ciphertext block before encryption.\n\
6. ChaCha20 Nonce - 12 random bytes per message that select a fresh keystream.\n\
Note: there is no integrity tag. Tampering is not reliably detected.\n";

/// One menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Encrypt,
    Decrypt,
    Explain,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Encrypt),
            "2" => Ok(Self::Decrypt),
            "3" => Ok(Self::Explain),
            "4" => Ok(Self::Quit),
            _ => Err(()),
        }
    }
}

const LINE_BUFFER: usize = 16;

/// Read lines from `reader` on a dedicated thread.
///
/// The channel closes at end of input, on a read error, or once the receiver
/// is dropped and the next line arrives.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_line_reader<R>(reader: R) -> Result<mpsc::Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    std::thread::Builder::new()
        .name("line-reader".into())
        .spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "input read failed");
                        break;
                    }
                };
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        })
        .context("failed to spawn line reader thread")?;
    Ok(rx)
}

/// Run the menu loop over `input` and `output` until quit or end of input.
///
/// Cancel safe: the future may be dropped while waiting for a line.
///
/// # Errors
///
/// Returns an error only on I/O failure.
pub async fn run<W>(
    session: &Session,
    input: mpsc::Receiver<String>,
    output: W,
    prompt: &str,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut shell = Shell {
        session,
        lines: input,
        out: output,
    };
    shell.run(prompt).await
}

struct Shell<'a, W> {
    session: &'a Session,
    lines: mpsc::Receiver<String>,
    out: W,
}

impl<W> Shell<'_, W>
where
    W: AsyncWrite + Unpin,
{
    async fn run(&mut self, prompt: &str) -> Result<()> {
        info!("Double Encryption/Decryption Interface started");
        self.write("Double Encryption/Decryption Interface\n").await?;

        loop {
            self.write(MENU).await?;
            let Some(line) = self.ask(prompt).await? else {
                debug!("input closed");
                break;
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Encrypt) => self.encrypt().await?,
                Ok(MenuChoice::Decrypt) => self.decrypt().await?,
                Ok(MenuChoice::Explain) => self.write(EXPLANATIONS).await?,
                Ok(MenuChoice::Quit) => {
                    self.write("Exiting...\n").await?;
                    break;
                }
                Err(()) => {
                    self.write("Invalid choice. Please enter a number from the menu.\n")
                        .await?
                }
            }
        }

        info!("Double Encryption/Decryption Interface exited");
        self.out.flush().await?;
        Ok(())
    }

    async fn encrypt(&mut self) -> Result<()> {
        let Some(text) = self.ask("Enter the text to encrypt: ").await? else {
            return Ok(());
        };
        match self.session.encrypt_text(&text) {
            Ok(transport) => {
                let msg = format!(
                    "\nDouble Encrypted Ciphertext (IV/Nonce, Ciphertext):\nCombined Data: {transport}\n"
                );
                self.write(&msg).await
            }
            Err(e) => {
                warn!(code = e.code(), "encryption failed");
                self.write(&format!("Encryption failed: {e}\n")).await
            }
        }
    }

    async fn decrypt(&mut self) -> Result<()> {
        let Some(transport) = self.ask("Enter the IV/Nonce and ciphertext: ").await? else {
            return Ok(());
        };
        match self.session.decrypt_text(&transport) {
            Ok(text) => self.write(&format!("\nDecrypted Text: {text}\n")).await,
            Err(e) => {
                warn!(code = e.code(), "decryption failed");
                self.write(&format!("Decryption failed: {e}\n")).await
            }
        }
    }

    /// Print `prompt` and read one line. `None` means input is exhausted.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.write(prompt).await?;
        self.out.flush().await?;
        Ok(self.lines.recv().await)
    }

    async fn write(&mut self, s: &str) -> Result<()> {
        self.out.write_all(s.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    use cascade::{KeyPair, KEY_LEN};

    fn session() -> Session {
        Session::new(KeyPair::new([0u8; KEY_LEN], [0u8; KEY_LEN]), None)
    }

    /// A closed channel preloaded with the lines of `script`.
    fn scripted(script: &str) -> mpsc::Receiver<String> {
        let lines: Vec<String> = script.lines().map(str::to_owned).collect();
        let (tx, rx) = mpsc::channel(lines.len().max(1));
        for line in lines {
            tx.try_send(line).unwrap();
        }
        rx
    }

    async fn drive(session: &Session, script: &str) -> String {
        let mut out = Vec::new();
        run(session, scripted(script), &mut out, "> ").await.unwrap();
        String::from_utf8(out).unwrap()
    }

    fn combined_data(output: &str) -> &str {
        output
            .lines()
            .find_map(|l| l.strip_prefix("Combined Data: "))
            .expect("no combined data in output")
    }

    #[test]
    fn parse_menu_choices() {
        assert_eq!(" 1 ".parse::<MenuChoice>(), Ok(MenuChoice::Encrypt));
        assert_eq!("2".parse::<MenuChoice>(), Ok(MenuChoice::Decrypt));
        assert_eq!("3".parse::<MenuChoice>(), Ok(MenuChoice::Explain));
        assert_eq!("4".parse::<MenuChoice>(), Ok(MenuChoice::Quit));
        assert!("5".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }

    #[tokio::test]
    async fn encrypt_then_decrypt() {
        let session = session();
        let out = drive(&session, "1\nHELLO\n4\n").await;
        let transport = combined_data(&out).to_owned();

        let out = drive(&session, &format!("2\n{transport}\n4\n")).await;
        assert!(out.contains("Decrypted Text: HELLO"), "{out}");
        assert!(out.contains("Exiting..."));
    }

    #[tokio::test]
    async fn bad_ciphertext_keeps_loop_running() {
        let out = drive(&session(), "2\nAAAA\n3\n4\n").await;
        assert!(out.contains("Decryption failed: truncated input"), "{out}");
        assert!(out.contains("Algorithm Explanations"));
        assert!(out.contains("Exiting..."));
    }

    #[tokio::test]
    async fn invalid_choice_is_reported() {
        let out = drive(&session(), "9\n4\n").await;
        assert!(out.contains("Invalid choice"));
    }

    #[tokio::test]
    async fn end_of_input_exits_cleanly() {
        let out = drive(&session(), "1\n").await;
        assert!(!out.contains("Combined Data"));
        assert!(!out.contains("Exiting..."));
    }

    #[tokio::test]
    async fn waiting_shell_can_be_dropped() {
        let session = session();
        let (_tx, rx) = mpsc::channel::<String>(1);
        let mut out = Vec::new();

        let waited =
            tokio::time::timeout(Duration::from_millis(50), run(&session, rx, &mut out, "> ")).await;
        assert!(waited.is_err(), "shell returned without input");

        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with("> "), "{out}");
    }

    #[tokio::test]
    async fn line_reader_forwards_lines_then_closes() {
        let mut rx = spawn_line_reader(Cursor::new(b"1\r\nHELLO\n4".as_slice())).unwrap();
        assert_eq!(rx.recv().await.as_deref(), Some("1"));
        assert_eq!(rx.recv().await.as_deref(), Some("HELLO"));
        assert_eq!(rx.recv().await.as_deref(), Some("4"));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn shell_runs_over_line_reader() {
        let rx = spawn_line_reader(Cursor::new(b"3\n4\n".as_slice())).unwrap();
        let mut out = Vec::new();
        run(&session(), rx, &mut out, "> ").await.unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Algorithm Explanations"));
        assert!(out.contains("Exiting..."));
    }
}

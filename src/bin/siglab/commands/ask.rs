use color_eyre::Result;
use signal_lab::assistant::{AssistantService, ChatExchange, GeminiClient};
use signal_lab::config::Config;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

pub async fn run(config: Config, context: &str, question: Option<&str>) -> Result<()> {
    let service = AssistantService::new(GeminiClient::new(&config.assistant)?);
    let mut exchange = ChatExchange::new();

    if let Some(question) = question {
        // Non-interactive mode
        let outcome = exchange.ask(&service, question, context).await.map(|_| ());
        print_last(&exchange);
        outcome?;
        return Ok(());
    }

    println!("▶ Ask about the page. Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        stdout.write_all(b">>> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        // Failures are already recorded as the assistant's turn.
        let _ = exchange.ask(&service, input, context).await;
        println!();
        print_last(&exchange);
        println!();
    }

    println!("Goodbye! ({} turns)", exchange.len());
    Ok(())
}

fn print_last(exchange: &ChatExchange) {
    if let Some(turn) = exchange.turns().last() {
        println!("{}", turn.text);
    }
}

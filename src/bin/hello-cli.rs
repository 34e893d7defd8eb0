use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "hello-cli")]
#[command(about = "Client for the quickstart HTTP API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8787")]
    url: String,

    /// Bearer token for the /api routes.
    #[arg(short, long, env = "API_TOKEN", default_value = "CHANGE_ME_IN_PRODUCTION")]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plain greeting with the server time
    Hello,
    /// Greet a name through the path
    HelloName { name: String },
    /// Greet a name through a JSON body
    HelloPost { name: String },
    /// Authenticated greeting
    Secure,
    /// Call the bounded long-running operation
    LongRunning,
    /// Ask the chat completion pass-through
    Complete {
        prompt: String,

        #[arg(short, long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let mut auth = HeaderMap::new();
    auth.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.token))?,
    );

    let request = match cli.command {
        Commands::Hello => client.get(format!("{base}/hello")),
        Commands::HelloName { name } => client.get(format!("{base}/hello/{name}")),
        Commands::HelloPost { name } => client
            .post(format!("{base}/hello"))
            .json(&json!({ "name": name })),
        Commands::Secure => client.get(format!("{base}/api/hello")).headers(auth),
        Commands::LongRunning => client.get(format!("{base}/long-running-operation")),
        Commands::Complete { prompt, model } => {
            let mut body = json!({ "messages": [{ "role": "user", "content": prompt }] });
            if let Some(model) = model {
                body["model"] = Value::String(model);
            }
            client
                .post(format!("{base}/api/completion"))
                .headers(auth)
                .json(&body)
        }
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{rendered}");
    } else {
        eprintln!("Error: API returned status {status}");
        eprintln!("Response: {rendered}");
    }
    Ok(())
}

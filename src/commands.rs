use std::path::Path;
use std::sync::Arc;

use slidesnap::api::ApiClient;
use slidesnap::config::Config;
use slidesnap::controller::{ConversionRequest, JobController, Mode, Phase};
use slidesnap::sink::ConsoleSink;
use slidesnap::timecode::Offset;
use slidesnap::timestamps::{NormalizedTimestamp, TimestampSpec, normalize};

use crate::cli::{ConvertArgs, PreviewArgs, StatusArgs};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn convert(args: ConvertArgs) -> Result<(), AnyError> {
    let config = Config::load()?;
    let client = Arc::new(ApiClient::new(&config.server.base_url, config.http.settings())?);

    let request = build_request(&args).await?;
    if let Some(spec) = &request.timestamps {
        print_preview(&normalize(spec));
    }

    let controller = JobController::new(Arc::clone(&client), ConsoleSink, config.polling.interval());
    let job_id = match controller.submit(request).await {
        Ok(job_id) => job_id,
        // The sink already reported the failure
        Err(_) => std::process::exit(1),
    };
    println!("job accepted: {job_id}");

    match controller.wait().await {
        Phase::Done {
            pdf_filename: Some(filename),
            ..
        } => {
            if args.no_download {
                println!("{}", controller.download_url(&filename));
                return Ok(());
            }
            let output_dir = args.output.unwrap_or(config.download.output_dir);
            save_artifact(&client, &filename, &output_dir).await
        }
        Phase::Done {
            pdf_filename: None, ..
        } => Err("job completed but the server reported no artifact".into()),
        _ => std::process::exit(1),
    }
}

pub async fn status(args: StatusArgs) -> Result<(), AnyError> {
    let config = Config::load()?;
    let client = ApiClient::new(&config.server.base_url, config.http.settings())?;

    let snapshot = client.job_status(&args.job_id).await?;
    println!("status: {:?}", snapshot.status);
    if let Some(progress) = snapshot.progress {
        println!("progress: {}%", (progress.clamp(0.0, 1.0) * 100.0).round());
    }
    if let Some(message) = snapshot.message {
        println!("message: {message}");
    }
    if let Some(details) = snapshot.details {
        println!("details: {details}");
    }
    if let Some(filename) = snapshot.pdf_filename {
        println!("download: {}", client.download_url(&filename));
    }
    Ok(())
}

pub async fn preview(args: PreviewArgs) -> Result<(), AnyError> {
    let text = tokio::fs::read_to_string(&args.timestamps).await?;
    let spec = TimestampSpec::from_json_str(&text)?;
    print_preview(&normalize(&spec));
    Ok(())
}

/// Assemble the conversion request from CLI flags
///
/// `--interval` selects interval mode; `--timestamps FILE` or `--at LIST`
/// select custom mode. With no mode flag at all the service default
/// interval (60s) is used.
async fn build_request(args: &ConvertArgs) -> Result<ConversionRequest, AnyError> {
    let (mode, interval, timestamps) = if let Some(file) = &args.timestamps {
        let text = tokio::fs::read_to_string(file).await?;
        (Mode::Custom, None, Some(TimestampSpec::from_json_str(&text)?))
    } else if let Some(list) = &args.at {
        (Mode::Custom, None, Some(parse_at_list(list)?))
    } else {
        (Mode::Interval, Some(args.interval.unwrap_or(60)), None)
    };

    Ok(ConversionRequest {
        video_url: args.url.clone(),
        mode,
        interval,
        timestamps,
    })
}

/// Parse a comma-separated `--at` list ("0:30,1:45,2:10") into an
/// array-form timestamp document of plain seconds
fn parse_at_list(list: &str) -> Result<TimestampSpec, AnyError> {
    let mut tokens = Vec::new();
    for item in list.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let offset: Offset = item.parse()?;
        let secs = offset.as_secs_f64();
        if secs.fract() == 0.0 {
            tokens.push(serde_json::json!((secs as u64).to_string()));
        } else {
            tokens.push(serde_json::json!(secs.to_string()));
        }
    }
    Ok(TimestampSpec::from_value(serde_json::Value::Array(tokens))?)
}

fn print_preview(entries: &[NormalizedTimestamp]) {
    if entries.is_empty() {
        println!("No timestamps loaded");
        return;
    }

    println!("{} timestamps", entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if entry.note.is_empty() {
            println!("#{:<3} {}", index + 1, entry.display_time);
        } else {
            println!("#{:<3} {}  {}", index + 1, entry.display_time, entry.note);
        }
    }
}

async fn save_artifact(
    client: &ApiClient,
    pdf_filename: &str,
    output_dir: &Path,
) -> Result<(), AnyError> {
    // The filename is server-supplied; keep only its final component
    let name = Path::new(pdf_filename)
        .file_name()
        .ok_or("server returned an empty artifact name")?;

    let bytes = client.download(pdf_filename).await?;
    tokio::fs::create_dir_all(output_dir).await?;
    let target = output_dir.join(name);
    tokio::fs::write(&target, &bytes).await?;
    println!("saved {}", target.display());
    Ok(())
}

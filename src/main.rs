/*
 * Pixpie Server SDK - Command Line Client
 * Copyright (C) 2025 Akaere Networks
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::blocking::Response;

use pixpie_sdk::config::{Cli, Command};
use pixpie_sdk::core::logger::{self, log_task_failed, log_task_ok, log_task_start};
use pixpie_sdk::{ClientConfig, ImageTransform, ServerApiClient};

fn main() -> Result<()> {
    let args = Cli::parse();

    logger::init_from_args(args.debug, args.journald).context("failed to initialize logger")?;

    let config = match &args.config {
        Some(path) => ClientConfig::from_toml_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ClientConfig::from_env().context("failed to read PIXPIE_* environment")?,
    };

    log_task_start(&format!("Authenticating {}", config.reverse_url_id));
    let client = match ServerApiClient::with_config(config) {
        Ok(client) => {
            log_task_ok("Authenticated");
            client
        }
        Err(e) => {
            log_task_failed("Authentication", &e.to_string());
            return Err(e.into());
        }
    };

    run(&client, args.command)
}

fn run(client: &ServerApiClient, command: Command) -> Result<()> {
    match command {
        Command::Url { image, remote, transform } => {
            let transform = ImageTransform::from(transform);
            let url = if remote {
                client.get_remote_image_url(&image, &transform)
            } else {
                client.get_image_url(&image, &transform)
            };
            println!("{}", url);
        }
        Command::Fetch { image, output, remote, transform } => {
            let transform = ImageTransform::from(transform);
            let response = if remote {
                client.get_remote_image(&image, &transform)?
            } else {
                client.get_image(&image, &transform)?
            };
            let status = response.status();
            if !status.is_success() {
                anyhow::bail!("CDN returned {}", status);
            }
            let bytes = response.bytes()?;
            std::fs::write(&output, &bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            log_task_ok(&format!("Saved {} bytes to {}", bytes.len(), output.display()));
        }
        Command::Upload { file, inner_path, async_upload } => {
            let response = if async_upload {
                client.upload_image_async(&file, &inner_path)
            } else {
                client.upload_image(&file, &inner_path)
            }
            .with_context(|| format!("failed to upload {}", file.display()))?;
            print_response(response)?;
        }
        Command::List { inner_path } => {
            print_response(client.list_items(&inner_path)?)?;
        }
        Command::DirExists { parent, folder } => match client.dir_exists(&parent, &folder)? {
            Some(exists) => println!("{}", exists),
            None => println!("unknown"),
        },
        Command::Delete { images, folders } => {
            if images.is_empty() && folders.is_empty() {
                anyhow::bail!("nothing to delete: pass --image and/or --folder");
            }
            print_response(client.batch_delete(images, folders)?)?;
        }
    }
    Ok(())
}

fn print_response(response: Response) -> Result<()> {
    let status = response.status();
    let body = response.text().unwrap_or_default();
    println!("HTTP {}", status);
    if !body.is_empty() {
        println!("{}", body);
    }
    if !status.is_success() {
        anyhow::bail!("request failed with status {}", status);
    }
    Ok(())
}

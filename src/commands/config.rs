use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::cli::ConfigCmd;
use crate::types::Config;
use crate::utils::config_file;

pub fn handle(cmd: ConfigCmd) -> Result<()> {
    let path = config_file("config")?;
    let cfg = Config::load(&path)?;

    match cmd {
        ConfigCmd::List => list(&cfg),
        ConfigCmd::Get { key } => get(&cfg, &key),
        ConfigCmd::Set { key, val } => set(cfg, &path, key, val),
        ConfigCmd::Unset { key } => unset(cfg, &path, &key),
    }
}

fn list(cfg: &Config) -> Result<()> {
    if cfg.map.is_empty() {
        println!("{}", "(no config set)".dimmed());
        return Ok(());
    }

    println!("{}", "Config:".cyan().bold());
    for (key, val) in &cfg.map {
        println!("  {} = {}", key.green(), val);
    }
    Ok(())
}

fn get(cfg: &Config, key: &str) -> Result<()> {
    match cfg.map.get(key) {
        Some(val) => println!("{}", val),
        None => println!("{} key `{}` not found", "warning:".yellow().bold(), key),
    }
    Ok(())
}

fn set(mut cfg: Config, path: &Path, key: String, val: String) -> Result<()> {
    cfg.map.insert(key.clone(), val.clone());
    cfg.save(path)?;
    println!("{} set `{}` = `{}`", "ok:".green().bold(), key.green(), val);
    Ok(())
}

fn unset(mut cfg: Config, path: &Path, key: &str) -> Result<()> {
    if cfg.map.remove(key).is_none() {
        println!("{} key `{}` not found", "warning:".yellow().bold(), key);
        return Ok(());
    }

    cfg.save(path)?;
    println!("{} removed `{}`", "ok:".green().bold(), key.green());
    Ok(())
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Build a house and write it as OBJ plus a JSON summary.
//!
//! Usage: `house-to-obj [params.json]`. Without a parameter file the
//! reference house is built. Configuration comes from `HOUSEFORGE_*`
//! environment variables, logging from `RUST_LOG`.

use houseforge_core::HouseParams;
use houseforge_processing::{build_house, summary_json, to_obj, BuildConfig, HouseModel, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        tracing::error!(error = %err, "house build failed");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = BuildConfig::from_env();
    let params = match std::env::args().nth(1) {
        Some(path) => load_params(Path::new(&path))?,
        None => HouseParams::default(),
    };

    tracing::info!(
        parallel = config.parallel,
        worker_threads = config.worker_threads,
        shell_role = ?config.shell_role,
        output = %config.output.display(),
        "starting house build"
    );

    let model = HouseModel::prepare(&params)?;
    let geometry = build_house(&model, &config)?;

    let mut writer = BufWriter::new(File::create(&config.output)?);
    to_obj(&geometry, &mut writer)?;
    writer.flush()?;

    let summary_path = config.summary_path();
    std::fs::write(&summary_path, summary_json(&geometry)?)?;

    tracing::info!(
        obj = %config.output.display(),
        summary = %summary_path.display(),
        "wrote house"
    );
    Ok(())
}

fn load_params(path: &Path) -> Result<HouseParams> {
    let reader = BufReader::new(File::open(path)?);
    let params: HouseParams = serde_json::from_reader(reader)?;
    tracing::info!(path = %path.display(), "loaded house parameters");
    Ok(params)
}

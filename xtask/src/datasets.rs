use anyhow::Result;
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Trait for downloadable datasets
pub trait Dataset {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn urls(&self) -> Vec<(&'static str, &'static str)>; // (url, expected_sha256)
}

/// Manager for dataset operations
pub struct DatasetManager {
    data_dir: PathBuf,
}

impl DatasetManager {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn download(&self, dataset: &dyn Dataset, force: bool) -> Result<()> {
        let dataset_dir = self.data_dir.join(dataset.name());

        if dataset_dir.exists() && !force {
            info!(
                "Dataset {} already exists at {}. Use --force to re-download.",
                dataset.name(),
                dataset_dir.display()
            );
            return Ok(());
        }

        std::fs::create_dir_all(&dataset_dir)?;

        let urls = dataset.urls();
        if urls.is_empty() {
            warn!("No download URLs available for {}", dataset.name());
            info!(
                "Dataset {} requires manual download. See: {}",
                dataset.name(),
                dataset.description()
            );
            return Ok(());
        }

        for (url, expected_hash) in urls {
            info!("Downloading from: {}", url);

            let filename = url.split('/').next_back().unwrap_or("download");
            let download_path = dataset_dir.join(filename);

            // Download with progress bar
            let data = download_with_progress(url)?;

            // Verify hash if provided
            if !expected_hash.is_empty() {
                let actual_hash = hex::encode(Sha256::digest(&data));
                if actual_hash != expected_hash {
                    anyhow::bail!(
                        "Hash mismatch for {}. Expected: {}, Got: {}",
                        filename,
                        expected_hash,
                        actual_hash
                    );
                }
                info!("Hash verified for {}", filename);
            }

            if filename.ends_with(".tar.gz") || filename.ends_with(".tgz") {
                extract_tar_gz(&data, &dataset_dir)?;
            } else {
                // Unknown type, save as-is
                std::fs::write(&download_path, &data)?;
            }
        }

        info!(
            "Dataset {} downloaded to {}",
            dataset.name(),
            dataset_dir.display()
        );
        Ok(())
    }

    pub fn verify(&self) -> Result<()> {
        info!("Verifying datasets in {}", self.data_dir.display());

        for entry in std::fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                let name = path.file_name().unwrap_or_default().to_string_lossy();
                info!("Checking dataset: {}", name);

                // Count binary shards
                let bin_count = count_bin_files(&path)?;
                info!("  Found {} .bin shards", bin_count);
            }
        }

        Ok(())
    }
}

/// Download data with progress bar
fn download_with_progress(url: &str) -> Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| anyhow::anyhow!("Failed to download from {}: {}", url, e))?;

    let total_size = response.content_length().unwrap_or(0);

    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
            .progress_chars("#>-"),
    );

    let mut data = Vec::new();
    let mut stream = response;
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = stream.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..bytes_read]);
        pb.inc(bytes_read as u64);
    }

    pb.finish_with_message("Download complete");
    Ok(data)
}

/// Extract tar.gz archive
fn extract_tar_gz(data: &[u8], dest: &Path) -> Result<()> {
    let tar = GzDecoder::new(data);
    let mut archive = tar::Archive::new(tar);
    archive.unpack(dest)?;
    Ok(())
}

/// Count CIFAR binary shards in directory
fn count_bin_files(dir: &Path) -> Result<usize> {
    let mut count = 0;

    for entry in walkdir::WalkDir::new(dir) {
        let entry = entry?;
        let path = entry.path();

        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if ext == "bin" {
                count += 1;
            }
        }
    }

    Ok(count)
}

// ============================================================================
// Dataset Implementations
// ============================================================================

/// CIFAR-10 in the binary layout read by rdae-data's loader: five training
/// shards and one test shard of 10000 records each.
pub struct Cifar10Dataset;

impl Dataset for Cifar10Dataset {
    fn name(&self) -> &'static str {
        "cifar10"
    }

    fn description(&self) -> &'static str {
        "CIFAR-10 binary version (data_batch_1..5.bin + test_batch.bin)"
    }

    fn urls(&self) -> Vec<(&'static str, &'static str)> {
        // Upstream publishes md5 only; record structure is validated at load time.
        vec![("https://www.cs.toronto.edu/~kriz/cifar-10-binary.tar.gz", "")]
    }
}

use crate::cli::ThreadArgs;
use crate::readers::read_matrix;
use crate::threader::ThreadingParams;
use crate::utils::{open_text_reader, Result};
use crate::workflows::{phase_family, FamilyInput, FamilyResult};
use crate::writers::FamilyWriter;
use crossbeam_channel::{bounded, Sender};
use rayon::{
    iter::{ParallelBridge, ParallelIterator},
    ThreadPoolBuilder,
};
use std::{
    io::BufRead,
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};

const CHANNEL_BUFFER_SIZE: usize = 2048;

pub fn thread_families(args: ThreadArgs) -> Result<()> {
    let params = Arc::new(ThreadingParams {
        max_iterations: match args.max_iterations {
            0 => None,
            max => Some(max),
        },
    });
    let mut family_writer = FamilyWriter::create(&args.output_prefix)?;

    let (sender_family, receiver_family) = bounded(CHANNEL_BUFFER_SIZE);
    let manifest_path = args.manifest_path.clone();
    let family_stream_thread =
        thread::spawn(move || stream_families_into_channel(&manifest_path, sender_family));

    let (sender_result, receiver_result) = bounded::<FamilyResult>(CHANNEL_BUFFER_SIZE);
    let writer_thread = thread::spawn(move || -> Result<usize> {
        let mut num_families = 0;
        for result in &receiver_result {
            family_writer.write(&result)?;
            num_families += 1;
        }
        family_writer.flush()?;
        Ok(num_families)
    });

    log::debug!(
        "Initializing thread pool with {} threads...",
        args.num_threads
    );
    let pool = initialize_thread_pool(args.num_threads)?;
    pool.install(|| {
        receiver_family
            .into_iter()
            .par_bridge()
            .for_each_with(&sender_result, |s, family_input| match family_input {
                Ok(family) => process_family(family, &params, s),
                Err(err) => log::error!("Family loading: {}", err),
            });
    });

    // Clean-up
    drop(sender_result);
    let num_families = writer_thread.join().expect("Writer thread panicked")?;
    log::trace!("Writer thread finished");
    family_stream_thread
        .join()
        .expect("Family stream thread panicked")?;
    log::info!("Wrote results for {} families", num_families);

    Ok(())
}

fn process_family(
    family: FamilyInput,
    params: &ThreadingParams,
    sender_result: &Sender<FamilyResult>,
) {
    let family_id = family.family_id.clone();
    match phase_family(family, params) {
        Ok(result) => {
            if let Err(e) = sender_result.send(result) {
                log::error!("Failed to send family result to writer thread: {}", e);
            }
        }
        Err(err) => log::error!("Error phasing family {}: {}", family_id, err),
    }
}

fn initialize_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("sgphase-{}", i))
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))
}

/// Loads every family listed in the manifest and sends it to the workers.
///
/// A family that fails to load is sent as an error so the remaining families still run.
/// Matrix paths are resolved against the manifest's directory.
fn stream_families_into_channel(
    manifest_path: &Path,
    sender: Sender<Result<FamilyInput>>,
) -> Result<()> {
    let manifest_reader = open_text_reader(manifest_path)?;
    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new(""));

    for (line_number, result_line) in manifest_reader.lines().enumerate() {
        let line = result_line
            .map_err(|e| format!("Error at manifest line {}: {}", line_number + 1, e))?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let family = load_family(&line, base_dir)
            .map_err(|e| format!("Error at manifest line {}: {}", line_number + 1, e));
        sender
            .send(family)
            .map_err(|_| "Family channel closed before the manifest was read".to_string())?;
    }
    Ok(())
}

fn load_family(line: &str, base_dir: &Path) -> Result<FamilyInput> {
    const EXPECTED_FIELD_COUNT: usize = 3;
    let split_line: Vec<&str> = line.split('\t').collect();
    let (family_id, reference_path, reads_path) = match &split_line[..] {
        [family_id, reference_path, reads_path] => (*family_id, *reference_path, *reads_path),
        _ => {
            return Err(format!(
                "Expected {} fields in the format 'family_id reference_tsv reads_tsv', found {}",
                EXPECTED_FIELD_COUNT,
                split_line.len()
            ))
        }
    };
    Ok(FamilyInput {
        family_id: family_id.to_string(),
        reference: load_matrix(&resolve(base_dir, reference_path))?,
        reads: load_matrix(&resolve(base_dir, reads_path))?,
    })
}

fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn load_matrix(path: &Path) -> Result<crate::matrix::ReadBaseMatrix> {
    read_matrix(open_text_reader(path)?).map_err(|e| format!("{}: {}", path.display(), e))
}

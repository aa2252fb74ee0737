//! JSON log output of a pipeline load.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use airrep_cli::logging::{LogConfig, LogFormat, init_logging_with_writer};
use airrep_core::{PipelineConfig, ReportPipeline};
use airrep_model::ReportKind;
use tempfile::TempDir;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn load_warnings_carry_span_fields_at_default_level() {
    let buffer = Buffer::default();
    let config = LogConfig {
        level_filter: LevelFilter::WARN,
        use_env_filter: false,
        with_ansi: false,
        format: LogFormat::Json,
        ..LogConfig::default()
    };
    init_logging_with_writer(&config, buffer.clone());

    let pipeline = ReportPipeline::new(PipelineConfig {
        data_dir: "/nonexistent/airrep".into(),
        ..PipelineConfig::default()
    });
    assert!(pipeline.load(ReportKind::Enplanement, None).is_err());

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let line = output
        .lines()
        .find(|line| line.contains("report load failed"))
        .expect("failure event");
    assert!(line.contains("\"level\":\"WARN\""));
    assert!(line.contains("\"kind\":\"enplanement\""));
    assert!(line.contains("EnplanementReport.csv"));

    // A payment export without its period labels warns mid-load.
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(ReportKind::Payment.default_file_name()),
        "Company Payment Report\n,\n,\n,\n,\n\
         Agent/GSA Name,Currency,Net Amount\n\
         Alpha Travel,USD,10\n\
         Total,,10\n,,\nPrinted,,\n",
    )
    .unwrap();
    let pipeline = ReportPipeline::new(PipelineConfig {
        data_dir: dir.path().to_path_buf(),
        output_dir: dir.path().join("processed"),
        persist_processed: false,
    });
    assert!(pipeline.load(ReportKind::Payment, None).is_ok());

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let line = output
        .lines()
        .find(|line| line.contains("metadata value not found"))
        .expect("metadata warning");
    assert!(line.contains("\"kind\":\"payment\""));
}

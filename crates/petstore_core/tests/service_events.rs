use log::{LevelFilter, Log, Metadata, Record};
use petstore_core::{InMemoryPetRepository, Pet, PetService};
use std::sync::{Mutex, OnceLock};

struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<&'static CaptureLogger> = OnceLock::new();

fn capture() -> &'static CaptureLogger {
    LOGGER.get_or_init(|| {
        let logger: &'static CaptureLogger = Box::leak(Box::new(CaptureLogger {
            lines: Mutex::new(Vec::new()),
        }));
        log::set_logger(logger).unwrap();
        log::set_max_level(LevelFilter::Trace);
        logger
    })
}

fn take_lines(logger: &CaptureLogger) -> Vec<String> {
    std::mem::take(&mut *logger.lines.lock().unwrap())
}

// One test per binary: the logger is process-global.
#[test]
fn finders_emit_completion_events_without_caller_text() {
    let logger = capture();
    let service = PetService::new(InMemoryPetRepository::new());
    let forged = "cat\nevent=pet_delete module=service status=ok id=1";
    let mut pet = Pet::new("Rex\nevent=forged", forged, true);
    service.save(&mut pet).unwrap();
    take_lines(logger);

    assert_eq!(service.find_by_category(forged).unwrap().len(), 1);
    assert_eq!(service.find_by_name("Rex\nevent=forged").unwrap().len(), 1);
    let lines = take_lines(logger);
    assert_eq!(
        lines,
        [
            "event=pet_query module=service status=ok filter=category count=1",
            "event=pet_query module=service status=ok filter=name count=1",
        ]
    );
    assert!(lines.iter().all(|line| !line.contains('\n')));

    service.find_by_availability(false).unwrap();
    service.find(1).unwrap();
    service.find(2).unwrap();
    service.find_or_404(1).unwrap();
    service.find_or_404(2).unwrap_err();
    assert_eq!(
        take_lines(logger),
        [
            "event=pet_query module=service status=ok filter=available=false count=0",
            "event=pet_lookup module=service status=ok id=1 found=true",
            "event=pet_lookup module=service status=ok id=2 found=false",
            "event=pet_lookup module=service status=ok id=1 required=true",
            "event=pet_lookup module=service status=not_found id=2 required=true",
        ]
    );
}

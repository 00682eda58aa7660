//! Dynamic loader and scoped reader for the EDF access API.
//!
//! The vendor library is resolved with `libloading` at runtime, so the
//! crate builds without SR Research headers or link-time dependencies.
//! File handles are scoped: [`EdfFile`] closes its native handle on
//! drop, even on the error path, because the vendor library has shown
//! non-reproducible numeric artifacts when state lingers across
//! repeated in-process reads.

use std::ffi::{c_char, c_int, c_uint, CString};
use std::path::Path;
use std::sync::Arc;

use edf2arrow_core::{Eye, FieldValue, RawEdfFile, RawEvent, RawMessage, RawRecord};
use libloading::{Library, Symbol};

use crate::error::EdfApiError;
use crate::ffi::{
    lstring_to_string, AllfData, EdfFileHandle, Fevent, Fsample, ENDBLINK, ENDFIX, ENDSACC,
    MESSAGEEVENT, NO_PENDING_ITEMS, SAMPLE_TYPE,
};

/// Platform-specific name of the vendor library.
#[cfg(target_os = "windows")]
pub const DEFAULT_LIBRARY: &str = "edfapi64.dll";
#[cfg(target_os = "macos")]
pub const DEFAULT_LIBRARY: &str = "libedfapi.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const DEFAULT_LIBRARY: &str = "libedfapi.so";

/// Column names of the assembled samples table, in output order. Paired
/// sample fields appear split per eye; this is also the schema of a
/// zero-row samples table when sample reading is skipped.
pub const SAMPLE_COLUMNS: [&str; 46] = [
    "time",
    "left_px",
    "right_px",
    "left_py",
    "right_py",
    "left_hx",
    "right_hx",
    "left_hy",
    "right_hy",
    "left_pa",
    "right_pa",
    "left_gx",
    "right_gx",
    "left_gy",
    "right_gy",
    "rx",
    "ry",
    "left_gxvel",
    "right_gxvel",
    "left_gyvel",
    "right_gyvel",
    "left_hxvel",
    "right_hxvel",
    "left_hyvel",
    "right_hyvel",
    "left_rxvel",
    "right_rxvel",
    "left_ryvel",
    "right_ryvel",
    "left_fgxvel",
    "right_fgxvel",
    "left_fgyvel",
    "right_fgyvel",
    "left_fhxvel",
    "right_fhxvel",
    "left_fhyvel",
    "right_fhyvel",
    "left_frxvel",
    "right_frxvel",
    "left_fryvel",
    "right_fryvel",
    "flags",
    "input",
    "buttons",
    "htype",
    "errors",
];

/// Function table resolved from the vendor library.
///
/// The `_lib` field keeps the library alive so the pointers stay valid.
pub struct EdfApi {
    _lib: Library,
    open_file:
        unsafe extern "C" fn(*const c_char, c_int, c_int, c_int, *mut c_int) -> *mut EdfFileHandle,
    close_file: unsafe extern "C" fn(*mut EdfFileHandle) -> c_int,
    get_next_data: unsafe extern "C" fn(*mut EdfFileHandle) -> c_int,
    get_float_data: unsafe extern "C" fn(*mut EdfFileHandle) -> *mut AllfData,
    get_element_count: unsafe extern "C" fn(*mut EdfFileHandle) -> c_uint,
    get_preamble_text: unsafe extern "C" fn(*mut EdfFileHandle, *mut c_char, c_int) -> c_int,
    get_preamble_text_length: unsafe extern "C" fn(*mut EdfFileHandle) -> c_int,
}

/// What the native walk should produce.
#[derive(Debug, Clone)]
pub struct RawReadOptions {
    /// Skip individual samples, keeping only events and messages.
    pub ignore_samples: bool,
    /// Message prefix that starts a new trial.
    pub trial_marker: String,
}

impl Default for RawReadOptions {
    fn default() -> Self {
        Self {
            ignore_samples: false,
            trial_marker: "TRIALID".to_string(),
        }
    }
}

impl EdfApi {
    /// Load the vendor library from its platform-default name.
    pub fn load_default() -> Result<Arc<Self>, EdfApiError> {
        Self::load(DEFAULT_LIBRARY)
    }

    /// Load the vendor library from `library` and resolve all required
    /// symbols up front.
    pub fn load(library: &str) -> Result<Arc<Self>, EdfApiError> {
        let err = |source| EdfApiError::Load {
            library: library.to_string(),
            source,
        };
        unsafe {
            let lib = Library::new(library).map_err(err)?;
            let open_file: Symbol<
                unsafe extern "C" fn(
                    *const c_char,
                    c_int,
                    c_int,
                    c_int,
                    *mut c_int,
                ) -> *mut EdfFileHandle,
            > = lib.get(b"edf_open_file").map_err(err)?;
            let close_file: Symbol<unsafe extern "C" fn(*mut EdfFileHandle) -> c_int> =
                lib.get(b"edf_close_file").map_err(err)?;
            let get_next_data: Symbol<unsafe extern "C" fn(*mut EdfFileHandle) -> c_int> =
                lib.get(b"edf_get_next_data").map_err(err)?;
            let get_float_data: Symbol<unsafe extern "C" fn(*mut EdfFileHandle) -> *mut AllfData> =
                lib.get(b"edf_get_float_data").map_err(err)?;
            let get_element_count: Symbol<unsafe extern "C" fn(*mut EdfFileHandle) -> c_uint> =
                lib.get(b"edf_get_element_count").map_err(err)?;
            let get_preamble_text: Symbol<
                unsafe extern "C" fn(*mut EdfFileHandle, *mut c_char, c_int) -> c_int,
            > = lib.get(b"edf_get_preamble_text").map_err(err)?;
            let get_preamble_text_length: Symbol<
                unsafe extern "C" fn(*mut EdfFileHandle) -> c_int,
            > = lib.get(b"edf_get_preamble_text_length").map_err(err)?;

            Ok(Arc::new(Self {
                open_file: *open_file,
                close_file: *close_file,
                get_next_data: *get_next_data,
                get_float_data: *get_float_data,
                get_element_count: *get_element_count,
                get_preamble_text: *get_preamble_text,
                get_preamble_text_length: *get_preamble_text_length,
                _lib: lib,
            }))
        }
    }

    /// Open an EDF file. Events are always loaded; samples only when
    /// `load_samples` is set.
    pub fn open(
        self: &Arc<Self>,
        path: &Path,
        load_samples: bool,
    ) -> Result<EdfFile, EdfApiError> {
        let display = path.display().to_string();
        let c_path = CString::new(display.as_str()).map_err(|_| EdfApiError::InvalidPath {
            path: display.clone(),
        })?;
        let mut code: c_int = 0;
        let handle = unsafe {
            (self.open_file)(
                c_path.as_ptr(),
                2, // consistency check with fix-up
                1,
                load_samples as c_int,
                &mut code,
            )
        };
        if handle.is_null() || code != 0 {
            return Err(EdfApiError::Open {
                path: display,
                code,
            });
        }
        Ok(EdfFile {
            api: Arc::clone(self),
            handle,
        })
    }
}

/// An open EDF file. The native handle is released on drop.
pub struct EdfFile {
    api: Arc<EdfApi>,
    handle: *mut EdfFileHandle,
}

impl EdfFile {
    /// Total number of elements in the file, for progress reporting.
    pub fn element_count(&self) -> u32 {
        unsafe { (self.api.get_element_count)(self.handle) }
    }

    /// Read the free-text preamble block at the start of the file.
    pub fn preamble_text(&mut self) -> Result<String, EdfApiError> {
        unsafe {
            let len = (self.api.get_preamble_text_length)(self.handle);
            if len < 0 {
                return Err(EdfApiError::Preamble { code: len });
            }
            let mut buffer = vec![0u8; len as usize + 1];
            let code =
                (self.api.get_preamble_text)(self.handle, buffer.as_mut_ptr().cast(), len + 1);
            if code != 0 {
                return Err(EdfApiError::Preamble { code });
            }
            let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
            buffer.truncate(end);
            Ok(String::from_utf8_lossy(&buffer).into_owned())
        }
    }

    /// Walk the element stream once and collect the raw record triple.
    ///
    /// Trials are numbered from the trial-marker messages seen so far
    /// (records before the first marker get trial 0); each message also
    /// records the index of the last sample read before it.
    pub fn read_raw(&mut self, options: &RawReadOptions) -> Result<RawEdfFile, EdfApiError> {
        let mut raw = RawEdfFile::default();
        let mut current_trial: i64 = 0;
        let mut sample_index: i64 = 0;

        loop {
            let element_type = unsafe { (self.api.get_next_data)(self.handle) };
            if element_type == NO_PENDING_ITEMS {
                break;
            }
            let data = unsafe { (self.api.get_float_data)(self.handle) };
            if data.is_null() {
                continue;
            }
            match element_type {
                SAMPLE_TYPE => {
                    sample_index += 1;
                    if !options.ignore_samples {
                        raw.samples.push(sample_record(unsafe { &(*data).fs }));
                    }
                }
                ENDFIX | ENDSACC | ENDBLINK => {
                    let event = unsafe { &(*data).fe };
                    let kind = match element_type {
                        ENDFIX => "fixation",
                        ENDSACC => "saccade",
                        _ => "blink",
                    };
                    raw.events.push(RawEvent {
                        record: event_record(event, kind, current_trial),
                        eye: Eye::from_index(event.eye).unwrap_or(Eye::Left),
                        samples: Vec::new(),
                    });
                }
                MESSAGEEVENT => {
                    let event = unsafe { &(*data).fe };
                    let text = unsafe { lstring_to_string(event.message) };
                    if text.starts_with(&options.trial_marker) {
                        current_trial += 1;
                    }
                    raw.messages.push(RawMessage {
                        trial: current_trial,
                        sample: sample_index,
                        time: i64::from(event.sttime),
                        text,
                    });
                }
                // Start events, button/input events and recording info
                // carry nothing the tables need.
                _ => {}
            }
        }
        Ok(raw)
    }
}

impl Drop for EdfFile {
    fn drop(&mut self) {
        unsafe {
            (self.api.close_file)(self.handle);
        }
    }
}

fn sample_record(sample: &Fsample) -> RawRecord {
    fn pair(values: [f32; 2]) -> FieldValue {
        FieldValue::Pair([f64::from(values[0]), f64::from(values[1])])
    }

    let mut record = RawRecord::new();
    record.push("time", FieldValue::Int(i64::from(sample.time)));
    record.push("px", pair(sample.px));
    record.push("py", pair(sample.py));
    record.push("hx", pair(sample.hx));
    record.push("hy", pair(sample.hy));
    record.push("pa", pair(sample.pa));
    record.push("gx", pair(sample.gx));
    record.push("gy", pair(sample.gy));
    record.push("rx", FieldValue::Num(f64::from(sample.rx)));
    record.push("ry", FieldValue::Num(f64::from(sample.ry)));
    record.push("gxvel", pair(sample.gxvel));
    record.push("gyvel", pair(sample.gyvel));
    record.push("hxvel", pair(sample.hxvel));
    record.push("hyvel", pair(sample.hyvel));
    record.push("rxvel", pair(sample.rxvel));
    record.push("ryvel", pair(sample.ryvel));
    record.push("fgxvel", pair(sample.fgxvel));
    record.push("fgyvel", pair(sample.fgyvel));
    record.push("fhxvel", pair(sample.fhxvel));
    record.push("fhyvel", pair(sample.fhyvel));
    record.push("frxvel", pair(sample.frxvel));
    record.push("fryvel", pair(sample.fryvel));
    record.push("flags", FieldValue::Int(i64::from(sample.flags)));
    record.push("input", FieldValue::Int(i64::from(sample.input)));
    record.push("buttons", FieldValue::Int(i64::from(sample.buttons)));
    record.push("htype", FieldValue::Int(i64::from(sample.htype)));
    record.push("errors", FieldValue::Int(i64::from(sample.errors)));
    record
}

fn event_record(event: &Fevent, kind: &str, trial: i64) -> RawRecord {
    let mut record = RawRecord::new();
    record.push("trial", FieldValue::Int(trial));
    record.push("time", FieldValue::Int(i64::from(event.time)));
    record.push("type", FieldValue::text(kind));
    record.push("start", FieldValue::Int(i64::from(event.sttime)));
    record.push("end", FieldValue::Int(i64::from(event.entime)));
    for (name, value) in [
        ("hstx", event.hstx),
        ("hsty", event.hsty),
        ("gstx", event.gstx),
        ("gsty", event.gsty),
        ("sta", event.sta),
        ("henx", event.henx),
        ("heny", event.heny),
        ("genx", event.genx),
        ("geny", event.geny),
        ("ena", event.ena),
        ("havx", event.havx),
        ("havy", event.havy),
        ("gavx", event.gavx),
        ("gavy", event.gavy),
        ("ava", event.ava),
        ("avel", event.avel),
        ("pvel", event.pvel),
        ("svel", event.svel),
        ("evel", event.evel),
        ("supd_x", event.supd_x),
        ("eupd_x", event.eupd_x),
        ("supd_y", event.supd_y),
        ("eupd_y", event.eupd_y),
    ] {
        record.push(name, FieldValue::Num(f64::from(value)));
    }
    record.push("eye", FieldValue::Int(i64::from(event.eye)));
    record.push("buttons", FieldValue::Int(i64::from(event.buttons)));
    record
}

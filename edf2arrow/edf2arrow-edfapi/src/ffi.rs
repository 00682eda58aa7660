//! `#[repr(C)]` mirrors of the EDF access API data structures.
//!
//! Layouts follow `edf_data.h` of the SR Research EDF access API. Only
//! the records this crate reads are mirrored; the decoder itself stays
//! inside the vendor library.

use std::ffi::c_char;

/// Element type codes returned by `edf_get_next_data`.
pub const NO_PENDING_ITEMS: i32 = 0;
pub const STARTBLINK: i32 = 3;
pub const ENDBLINK: i32 = 4;
pub const STARTSACC: i32 = 5;
pub const ENDSACC: i32 = 6;
pub const STARTFIX: i32 = 7;
pub const ENDFIX: i32 = 8;
pub const MESSAGEEVENT: i32 = 24;
pub const RECORDING_INFO: i32 = 30;
pub const SAMPLE_TYPE: i32 = 200;

/// Opaque handle to an open EDF file inside the vendor library.
#[repr(C)]
pub struct EdfFileHandle {
    _private: [u8; 0],
}

/// Length-prefixed string as stored in [`Fevent::message`].
#[repr(C)]
pub struct Lstring {
    pub len: i16,
    pub c: [c_char; 1],
}

/// Floating-point sample record. Paired arrays are indexed left = 0,
/// right = 1.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Fsample {
    pub time: u32,
    pub px: [f32; 2],
    pub py: [f32; 2],
    pub hx: [f32; 2],
    pub hy: [f32; 2],
    pub pa: [f32; 2],
    pub gx: [f32; 2],
    pub gy: [f32; 2],
    pub rx: f32,
    pub ry: f32,
    pub gxvel: [f32; 2],
    pub gyvel: [f32; 2],
    pub hxvel: [f32; 2],
    pub hyvel: [f32; 2],
    pub rxvel: [f32; 2],
    pub ryvel: [f32; 2],
    pub fgxvel: [f32; 2],
    pub fgyvel: [f32; 2],
    pub fhxvel: [f32; 2],
    pub fhyvel: [f32; 2],
    pub frxvel: [f32; 2],
    pub fryvel: [f32; 2],
    pub hdata: [i16; 8],
    pub flags: u16,
    pub input: u16,
    pub buttons: u16,
    pub htype: i16,
    pub errors: u16,
}

/// Floating-point event record. Message events carry their text in
/// `message`; eye events leave it null.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Fevent {
    pub time: u32,
    pub evt_type: i16,
    pub read: u16,
    pub eye: i16,
    pub sttime: u32,
    pub entime: u32,
    pub hstx: f32,
    pub hsty: f32,
    pub gstx: f32,
    pub gsty: f32,
    pub sta: f32,
    pub henx: f32,
    pub heny: f32,
    pub genx: f32,
    pub geny: f32,
    pub ena: f32,
    pub havx: f32,
    pub havy: f32,
    pub gavx: f32,
    pub gavy: f32,
    pub ava: f32,
    pub avel: f32,
    pub pvel: f32,
    pub svel: f32,
    pub evel: f32,
    pub supd_x: f32,
    pub eupd_x: f32,
    pub supd_y: f32,
    pub eupd_y: f32,
    pub status: u16,
    pub flags: u16,
    pub input: u16,
    pub buttons: u16,
    pub parsedby: u16,
    pub message: *const Lstring,
}

/// Union the vendor library hands back from `edf_get_float_data`; the
/// element type code decides which view is valid.
#[repr(C)]
pub union AllfData {
    pub fe: Fevent,
    pub fs: Fsample,
}

/// Copy a nullable [`Lstring`] into an owned string, lossily for
/// non-UTF-8 bytes.
///
/// # Safety
/// `message` must be null or point to a live `Lstring` whose buffer
/// holds at least `len` bytes.
pub unsafe fn lstring_to_string(message: *const Lstring) -> String {
    if message.is_null() {
        return String::new();
    }
    unsafe {
        let len = (*message).len.max(0) as usize;
        let bytes = std::slice::from_raw_parts((*message).c.as_ptr().cast::<u8>(), len);
        String::from_utf8_lossy(bytes).into_owned()
    }
}

//! Windows COM implementation
//!
//! Late-bound IDispatch access to ASCOM drivers. Members are resolved by name
//! on every call, arguments and results are converted between VARIANT and
//! JSON values.

use std::ffi::c_void;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use windows::{
    core::{BSTR, GUID, PCWSTR},
    Win32::{
        Foundation::{DISP_E_EXCEPTION, DISP_E_MEMBERNOTFOUND, DISP_E_UNKNOWNNAME, VARIANT_BOOL},
        System::{
            Com::{
                CoCreateInstance, CoInitializeEx, CoUninitialize, CLSIDFromProgID, IDispatch,
                CLSCTX_ALL, COINIT_APARTMENTTHREADED, DISPATCH_FLAGS, DISPATCH_METHOD,
                DISPATCH_PROPERTYGET, DISPATCH_PROPERTYPUT, DISPPARAMS, EXCEPINFO, SAFEARRAY,
            },
            Variant::{
                VariantClear, VARENUM, VARIANT, VT_ARRAY, VT_BOOL, VT_BSTR, VT_BYREF, VT_DATE,
                VT_DISPATCH, VT_EMPTY, VT_I2, VT_I4, VT_I8, VT_INT, VT_NULL, VT_R4, VT_R8,
                VT_UI1, VT_UI2, VT_UI4, VT_UI8, VT_UINT, VT_VARIANT,
            },
        },
    },
};

use crate::{double_value, AscomError, AscomResult, DispatchObject};

// SAFEARRAY functions from OleAut32.dll
#[link(name = "oleaut32")]
extern "system" {
    fn SafeArrayGetDim(psa: *const SAFEARRAY) -> u32;
    fn SafeArrayGetLBound(psa: *const SAFEARRAY, nDim: u32, plLbound: *mut i32) -> windows::core::HRESULT;
    fn SafeArrayGetUBound(psa: *const SAFEARRAY, nDim: u32, plUbound: *mut i32) -> windows::core::HRESULT;
    fn SafeArrayAccessData(psa: *const SAFEARRAY, ppvData: *mut *mut c_void) -> windows::core::HRESULT;
    fn SafeArrayUnaccessData(psa: *const SAFEARRAY) -> windows::core::HRESULT;
}

const DISPID_PROPERTYPUT: i32 = -3;

/// Days between the OLE automation epoch (1899-12-30) and the Unix epoch
const OLE_UNIX_EPOCH_DAYS: f64 = 25_569.0;

/// Largest SAFEARRAY we are prepared to copy out
const MAX_ELEMENTS: usize = 150_000_000;

/// Initialize COM for the current thread
pub fn init_com() -> AscomResult<()> {
    unsafe {
        CoInitializeEx(None, COINIT_APARTMENTTHREADED).map_err(|e| AscomError::ComError {
            member: "CoInitializeEx".to_string(),
            hresult: e.code().0,
            message: e.message().to_string(),
        })
    }
}

/// Uninitialize COM for the current thread
pub fn uninit_com() {
    unsafe {
        CoUninitialize();
    }
}

/// A driver object created from its ProgID
pub struct ComObject {
    dispatch: IDispatch,
    prog_id: String,
}

impl ComObject {
    pub fn create(prog_id: &str) -> AscomResult<Self> {
        let activation_error = |e: windows::core::Error| AscomError::Activation {
            prog_id: prog_id.to_string(),
            reason: e.message().to_string(),
        };

        unsafe {
            let prog_id_wide = wide(prog_id);
            let clsid = CLSIDFromProgID(PCWSTR::from_raw(prog_id_wide.as_ptr())).map_err(activation_error)?;
            let dispatch: IDispatch = CoCreateInstance(&clsid, None, CLSCTX_ALL).map_err(activation_error)?;

            tracing::info!("Created ASCOM COM object for: {}", prog_id);
            Ok(Self {
                dispatch,
                prog_id: prog_id.to_string(),
            })
        }
    }

    fn invoke(&self, member: &str, flags: DISPATCH_FLAGS, args: &[Value], put: bool) -> AscomResult<Value> {
        let mut variants = args
            .iter()
            .rev()
            .map(|v| value_to_variant(member, v))
            .collect::<AscomResult<Vec<_>>>()?;

        let result = invoke_raw(&self.dispatch, &self.prog_id, member, flags, &mut variants, put);

        for v in variants.iter_mut() {
            unsafe {
                let _ = VariantClear(v);
            }
        }
        result
    }
}

impl DispatchObject for ComObject {
    fn get(&mut self, member: &str, args: &[Value]) -> AscomResult<Value> {
        self.invoke(member, DISPATCH_METHOD | DISPATCH_PROPERTYGET, args, false)
    }

    fn set(&mut self, member: &str, value: &Value) -> AscomResult<()> {
        self.invoke(member, DISPATCH_PROPERTYPUT, std::slice::from_ref(value), true)
            .map(|_| ())
    }

    fn call(&mut self, member: &str, args: &[Value]) -> AscomResult<Value> {
        self.invoke(member, DISPATCH_METHOD, args, false)
    }
}

impl Drop for ComObject {
    fn drop(&mut self) {
        tracing::debug!("Releasing COM object {}", self.prog_id);
    }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn dispid(dispatch: &IDispatch, member: &str) -> AscomResult<i32> {
    unsafe {
        let name_wide = wide(member);
        let names = [PCWSTR::from_raw(name_wide.as_ptr())];
        let mut id: i32 = 0;
        dispatch
            .GetIDsOfNames(&GUID::zeroed(), names.as_ptr(), 1, 0, &mut id)
            .map_err(|e| {
                if e.code() == DISP_E_UNKNOWNNAME {
                    AscomError::UnknownMember(member.to_string())
                } else {
                    com_error(member, &e)
                }
            })?;
        Ok(id)
    }
}

/// Invoke `member` with arguments already in reverse order
fn invoke_raw(
    dispatch: &IDispatch,
    origin: &str,
    member: &str,
    flags: DISPATCH_FLAGS,
    args: &mut [VARIANT],
    put: bool,
) -> AscomResult<Value> {
    let id = dispid(dispatch, member)?;
    let mut named = DISPID_PROPERTYPUT;
    let params = DISPPARAMS {
        rgvarg: if args.is_empty() { std::ptr::null_mut() } else { args.as_mut_ptr() },
        rgdispidNamedArgs: if put { &mut named } else { std::ptr::null_mut() },
        cArgs: args.len() as u32,
        cNamedArgs: if put { 1 } else { 0 },
    };

    let mut result = VARIANT::default();
    let mut excep_info = EXCEPINFO::default();
    let outcome = unsafe {
        dispatch.Invoke(
            id,
            &GUID::zeroed(),
            0,
            flags,
            &params,
            if put { None } else { Some(&mut result) },
            Some(&mut excep_info),
            None,
        )
    };

    let converted = match outcome {
        Ok(()) => unsafe { variant_to_value(&result) },
        Err(e) if e.code() == DISP_E_EXCEPTION => Err(driver_exception(origin, &excep_info)),
        Err(e) if e.code() == DISP_E_MEMBERNOTFOUND => Err(AscomError::UnknownMember(member.to_string())),
        Err(e) => Err(com_error(member, &e)),
    };

    unsafe {
        let _ = VariantClear(&mut result);
    }
    converted
}

fn com_error(member: &str, e: &windows::core::Error) -> AscomError {
    AscomError::ComError {
        member: member.to_string(),
        hresult: e.code().0,
        message: e.message().to_string(),
    }
}

fn driver_exception(origin: &str, excep: &EXCEPINFO) -> AscomError {
    let code = if excep.scode != 0 { excep.scode } else { excep.wCode as i32 };
    let source = if excep.bstrSource.is_empty() {
        origin.to_string()
    } else {
        excep.bstrSource.to_string()
    };
    let description = if excep.bstrDescription.is_empty() {
        "Unknown ASCOM error".to_string()
    } else {
        excep.bstrDescription.to_string()
    };
    AscomError::DriverException {
        code,
        origin: source,
        description,
    }
}

fn value_to_variant(member: &str, value: &Value) -> AscomResult<VARIANT> {
    unsafe {
        let mut var = VARIANT::default();
        let inner = &mut (*var.Anonymous.Anonymous);
        match value {
            Value::Null => inner.vt = VT_EMPTY,
            Value::Bool(b) => {
                inner.vt = VT_BOOL;
                inner.Anonymous.boolVal = VARIANT_BOOL(if *b { -1 } else { 0 });
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64().and_then(|i| i32::try_from(i).ok()) {
                    inner.vt = VT_I4;
                    inner.Anonymous.lVal = i;
                } else {
                    inner.vt = VT_R8;
                    inner.Anonymous.dblVal = n.as_f64().unwrap_or_default();
                }
            }
            // UTCDate is the only date-typed member written through the interfaces
            Value::String(s) if member == "UTCDate" => {
                let when = DateTime::parse_from_rfc3339(s)
                    .map_err(|e| AscomError::Conversion(format!("{} is not a date: {}", s, e)))?;
                inner.vt = VT_DATE;
                inner.Anonymous.date =
                    when.timestamp_millis() as f64 / 86_400_000.0 + OLE_UNIX_EPOCH_DAYS;
            }
            Value::String(s) => {
                inner.vt = VT_BSTR;
                inner.Anonymous.bstrVal = std::mem::ManuallyDrop::new(BSTR::from(s.as_str()));
            }
            other => {
                return Err(AscomError::Conversion(format!(
                    "cannot pass {} to {} as a COM argument",
                    other, member
                )))
            }
        }
        Ok(var)
    }
}

fn ole_date(date: f64) -> Value {
    let millis = ((date - OLE_UNIX_EPOCH_DAYS) * 86_400_000.0).round() as i64;
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(when) => Value::String(when.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => Value::Null,
    }
}

unsafe fn variant_to_value(var: &VARIANT) -> AscomResult<Value> {
    let inner = &(*var.Anonymous.Anonymous);
    let vt = inner.vt;

    if vt.0 & VT_ARRAY.0 != 0 {
        return safearray_to_value(inner.Anonymous.parray, VARENUM(vt.0 & !VT_ARRAY.0));
    }
    if vt.0 & VT_BYREF.0 != 0 {
        return Err(AscomError::Conversion(format!("by-reference VARIANT vt={}", vt.0)));
    }

    let value = match vt {
        VT_EMPTY | VT_NULL => Value::Null,
        VT_BOOL => Value::Bool(inner.Anonymous.boolVal.0 != 0),
        VT_UI1 => Value::from(inner.Anonymous.bVal),
        VT_I2 => Value::from(inner.Anonymous.iVal),
        VT_UI2 => Value::from(inner.Anonymous.uiVal),
        VT_I4 | VT_INT => Value::from(inner.Anonymous.lVal),
        VT_UI4 | VT_UINT => Value::from(inner.Anonymous.ulVal),
        VT_I8 => Value::from(inner.Anonymous.llVal),
        VT_UI8 => Value::from(inner.Anonymous.ullVal),
        VT_R4 => double_value(inner.Anonymous.fltVal as f64),
        VT_R8 => double_value(inner.Anonymous.dblVal),
        VT_DATE => ole_date(inner.Anonymous.date),
        VT_BSTR => Value::String(inner.Anonymous.bstrVal.to_string()),
        VT_DISPATCH => match &*inner.Anonymous.pdispVal {
            Some(dispatch) => dispatch_to_value(dispatch)?,
            None => Value::Null,
        },
        other => {
            return Err(AscomError::Conversion(format!("unsupported VARIANT type vt={}", other.0)))
        }
    };
    Ok(value)
}

/// Objects with a Count are collections, anything else is read as a rate
fn dispatch_to_value(dispatch: &IDispatch) -> AscomResult<Value> {
    match collection_to_value(dispatch) {
        Err(AscomError::UnknownMember(_)) => rate_to_value(dispatch),
        other => other,
    }
}

/// Read an ASCOM collection (Count plus 1-based Item) into an array.
///
/// Rate objects inside the collection become `{"Minimum": .., "Maximum": ..}`.
fn collection_to_value(dispatch: &IDispatch) -> AscomResult<Value> {
    let origin = "collection";
    let count = invoke_raw(dispatch, origin, "Count", DISPATCH_PROPERTYGET, &mut [], false)?
        .as_i64()
        .ok_or_else(|| AscomError::Conversion("collection Count is not an integer".to_string()))?;

    let mut items = Vec::with_capacity(count.max(0) as usize);
    for index in 1..=count {
        let mut arg = value_to_variant("Item", &Value::from(index))?;
        let item = invoke_raw(
            dispatch,
            origin,
            "Item",
            DISPATCH_METHOD | DISPATCH_PROPERTYGET,
            std::slice::from_mut(&mut arg),
            false,
        );
        items.push(item?);
    }
    Ok(Value::Array(items))
}

fn rate_to_value(dispatch: &IDispatch) -> AscomResult<Value> {
    let mut map = Map::new();
    for member in ["Minimum", "Maximum"] {
        let v = invoke_raw(dispatch, "rate", member, DISPATCH_PROPERTYGET, &mut [], false)?;
        map.insert(member.to_string(), v);
    }
    Ok(Value::Object(map))
}

unsafe fn safearray_to_value(psa: *mut SAFEARRAY, base: VARENUM) -> AscomResult<Value> {
    if psa.is_null() {
        return Ok(Value::Array(Vec::new()));
    }

    let dims = SafeArrayGetDim(psa);
    if dims == 0 || dims > 3 {
        return Err(AscomError::Conversion(format!("SAFEARRAY with {} dimensions", dims)));
    }

    let mut sizes = Vec::with_capacity(dims as usize);
    for dim in 1..=dims {
        let mut lower = 0i32;
        let mut upper = 0i32;
        if SafeArrayGetLBound(psa, dim, &mut lower).is_err() || SafeArrayGetUBound(psa, dim, &mut upper).is_err() {
            return Err(AscomError::Conversion(format!("cannot read bounds of dimension {}", dim)));
        }
        sizes.push(if upper < lower { 0 } else { (upper - lower + 1) as usize });
    }

    let total = sizes
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .filter(|&n| n <= MAX_ELEMENTS)
        .ok_or_else(|| AscomError::Conversion(format!("SAFEARRAY of {:?} elements is too large", sizes)))?;

    let mut data: *mut c_void = std::ptr::null_mut();
    if SafeArrayAccessData(psa, &mut data).is_err() {
        return Err(AscomError::Conversion("cannot access SAFEARRAY data".to_string()));
    }

    let flat = if total == 0 {
        Ok(Vec::new())
    } else if data.is_null() {
        Err(AscomError::Conversion("SAFEARRAY data pointer is null".to_string()))
    } else {
        (0..total).map(|i| element(data, base, i)).collect::<AscomResult<Vec<_>>>()
    };

    let _ = SafeArrayUnaccessData(psa);
    Ok(nest(&flat?, &sizes))
}

unsafe fn element(data: *mut c_void, base: VARENUM, index: usize) -> AscomResult<Value> {
    let value = match base {
        VT_I2 => Value::from(*(data as *const i16).add(index)),
        VT_UI2 => Value::from(*(data as *const u16).add(index)),
        VT_I4 | VT_INT => Value::from(*(data as *const i32).add(index)),
        VT_UI4 | VT_UINT => Value::from(*(data as *const u32).add(index)),
        VT_UI1 => Value::from(*(data as *const u8).add(index)),
        VT_R4 => double_value(*(data as *const f32).add(index) as f64),
        VT_R8 => double_value(*(data as *const f64).add(index)),
        VT_BOOL => Value::Bool((*(data as *const VARIANT_BOOL).add(index)).0 != 0),
        VT_BSTR => Value::String((*(data as *const BSTR).add(index)).to_string()),
        VT_VARIANT => variant_to_value(&*(data as *const VARIANT).add(index))?,
        VT_DISPATCH => match &*(data as *const Option<IDispatch>).add(index) {
            Some(dispatch) => dispatch_to_value(dispatch)?,
            None => Value::Null,
        },
        other => {
            return Err(AscomError::Conversion(format!("unsupported SAFEARRAY element type vt={}", other.0)))
        }
    };
    Ok(value)
}

/// Rebuild nested arrays from column-major SAFEARRAY storage, so that
/// `result[x][y]` is the element at indices (x, y).
fn nest(flat: &[Value], sizes: &[usize]) -> Value {
    fn build(flat: &[Value], sizes: &[usize], strides: &[usize], offset: usize) -> Value {
        match sizes.split_first() {
            None => flat.get(offset).cloned().unwrap_or(Value::Null),
            Some((&n, rest)) => Value::Array(
                (0..n)
                    .map(|i| build(flat, rest, &strides[1..], offset + i * strides[0]))
                    .collect(),
            ),
        }
    }

    let mut strides = Vec::with_capacity(sizes.len());
    let mut stride = 1;
    for &n in sizes {
        strides.push(stride);
        stride *= n;
    }
    build(flat, sizes, &strides, 0)
}

//! Native Win32 window drawn with GDI.
//!
//! The window owns no globals: [`run`] keeps a [`WindowContext`] on its own
//! stack for the lifetime of the message loop and hands its address to
//! `CreateWindowExW`.  The window procedure stores that pointer in
//! `GWLP_USERDATA` on `WM_NCCREATE` and clears it on `WM_NCDESTROY`, which
//! Windows sends before `GetMessageW` can observe the `WM_QUIT` that ends
//! the loop.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::ffi::c_void;

use bars_core::domain::layout::Rect;
use bars_core::{Rgb, ScrollCommand, Viewport, WindowPlacement};
use tracing::{debug, info, warn};
use windows::core::{w, HSTRING, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateSolidBrush, DeleteObject, EndPaint, FillRect, GetSysColorBrush,
    GetTextExtentPoint32W, InvalidateRect, SetBkMode, TextOutW, UpdateWindow, COLOR_WINDOW,
    HBRUSH, HDC, HGDIOBJ, PAINTSTRUCT, TRANSPARENT,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClientRect, GetMessageW,
    GetWindowLongPtrW, LoadCursorW, PostQuitMessage, RegisterClassW, SetScrollInfo,
    SetWindowLongPtrW, ShowWindow, SystemParametersInfoW, TranslateMessage, CREATESTRUCTW,
    CS_HREDRAW, CS_VREDRAW, GWLP_USERDATA, IDC_ARROW, MSG, SB_LINEDOWN, SB_LINEUP,
    SB_THUMBPOSITION, SB_THUMBTRACK, SB_VERT, SCROLLBAR_COMMAND, SCROLLINFO, SIF_PAGE, SIF_POS,
    SIF_RANGE, SPI_GETWORKAREA, SW_SHOW, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, WINDOW_EX_STYLE,
    WM_DESTROY, WM_ERASEBKGND, WM_MOUSEWHEEL, WM_NCCREATE, WM_NCDESTROY, WM_PAINT, WM_SIZE,
    WM_VSCROLL, WNDCLASSW, WS_OVERLAPPEDWINDOW, WS_VSCROLL,
};

use super::WindowError;
use crate::application::widget::{ScrollbarModel, WidgetState};
use crate::infrastructure::storage::settings::WindowSettings;

const CLASS_NAME: PCWSTR = w!("ProgressBarDashboardApp");

/// A GDI solid brush deleted on drop.
struct Brush(HBRUSH);

impl Brush {
    fn solid(color: Rgb) -> Self {
        // SAFETY: CreateSolidBrush has no preconditions; a failed call
        // returns an invalid handle which `Drop` skips.
        Self(unsafe { CreateSolidBrush(COLORREF(color.to_colorref())) })
    }
}

impl Drop for Brush {
    fn drop(&mut self) {
        if !self.0.is_invalid() {
            // SAFETY: the brush was created by us and is no longer selected
            // into any device context.
            unsafe {
                let _ = DeleteObject(HGDIOBJ(self.0 .0));
            }
        }
    }
}

/// Per-window state reachable from the window procedure.
struct WindowContext {
    state: WidgetState,
    track_brush: Brush,
    /// One brush per bar, indexed like the registry.
    bar_brushes: Vec<Brush>,
}

impl WindowContext {
    fn new(state: WidgetState) -> Self {
        let bar_brushes = state.registry().iter().map(|bar| Brush::solid(bar.color)).collect();
        Self {
            state,
            track_brush: Brush::solid(Rgb::TRACK),
            bar_brushes,
        }
    }
}

/// Creates the widget window and runs the message loop until it is closed.
///
/// # Errors
///
/// Returns [`WindowError`] if the window class cannot be registered, the
/// window cannot be created, or `GetMessageW` fails.
pub fn run(state: WidgetState, settings: &WindowSettings) -> Result<(), WindowError> {
    // SAFETY: a null module name returns the handle of the running executable.
    let instance = unsafe { GetModuleHandleW(None) }
        .map_err(|e| WindowError::RegisterClass(e.message()))?;

    let class = WNDCLASSW {
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(window_proc),
        hInstance: instance.into(),
        // SAFETY: IDC_ARROW is a predefined system cursor.
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
        lpszClassName: CLASS_NAME,
        ..Default::default()
    };
    // SAFETY: `class` is fully initialised and CLASS_NAME is a static string.
    if unsafe { RegisterClassW(&class) } == 0 {
        return Err(WindowError::RegisterClass(
            windows::core::Error::from_win32().message(),
        ));
    }

    let mut context = WindowContext::new(state);
    let placement = placement(settings);
    let title = HSTRING::from(settings.title.as_str());

    // SAFETY: `context` lives on this stack frame until after the message
    // loop has ended, and the window (the only user of the pointer) is
    // destroyed before that.
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            CLASS_NAME,
            &title,
            WS_OVERLAPPEDWINDOW | WS_VSCROLL,
            placement.x,
            placement.y,
            placement.width,
            placement.height,
            None,
            None,
            class.hInstance,
            Some(std::ptr::addr_of_mut!(context).cast::<c_void>().cast_const()),
        )
    }
    .map_err(|e| WindowError::Create(e.message()))?;

    info!(
        x = placement.x,
        y = placement.y,
        width = placement.width,
        height = placement.height,
        "widget window created"
    );

    // SAFETY: `hwnd` is the valid window created above.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
    }

    let mut msg = MSG::default();
    // SAFETY: Standard Win32 GetMessage/DispatchMessage loop pattern.
    unsafe {
        loop {
            match GetMessageW(&mut msg, None, 0, 0).0 {
                0 => break,
                -1 => {
                    let err = windows::core::Error::from_win32();
                    let _ = DestroyWindow(hwnd);
                    return Err(WindowError::MessageLoop(err.message()));
                }
                _ => {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }
        }
    }

    debug!("message loop finished");
    Ok(())
}

/// Bottom-right corner of the work area, or the screen origin if the work
/// area cannot be queried.
fn placement(settings: &WindowSettings) -> WindowPlacement {
    let (width, height) = settings.initial_size();
    let mut work = RECT::default();

    // SAFETY: SPI_GETWORKAREA writes exactly one RECT to the pointer.
    let queried = unsafe {
        SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(std::ptr::addr_of_mut!(work).cast::<c_void>()),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };

    match queried {
        Ok(()) => WindowPlacement::bottom_right(
            Rect::new(work.left, work.top, work.right, work.bottom),
            width,
            height,
            settings.edge_offset,
        ),
        Err(e) => {
            warn!("could not query the desktop work area: {e}");
            WindowPlacement {
                x: 0,
                y: 0,
                width,
                height,
            }
        }
    }
}

/// The context stored by `WM_NCCREATE`, if any.
///
/// # Safety
///
/// The returned reference must not outlive the current message and must
/// not be held across calls that can re-enter the window procedure.
unsafe fn context<'a>(hwnd: HWND) -> Option<&'a mut WindowContext> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WindowContext;
    ptr.as_mut()
}

/// Window procedure.
///
/// # Safety
///
/// Called by Windows on the thread that created the window.
unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_NCCREATE => {
            // SAFETY: for WM_NCCREATE, lparam points to the CREATESTRUCTW
            // whose lpCreateParams is the context pointer passed by `run`.
            let create = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, create.lpCreateParams as isize);
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        WM_PAINT => {
            paint(hwnd);
            LRESULT(0)
        }
        WM_SIZE => {
            let viewport = Viewport::new(
                (lparam.0 & 0xFFFF) as i32,
                ((lparam.0 >> 16) & 0xFFFF) as i32,
            );
            let scrollbar = context(hwnd).map(|ctx| {
                ctx.state.resize(viewport);
                ctx.state.scrollbar()
            });
            if let Some(scrollbar) = scrollbar {
                set_scrollbar(hwnd, scrollbar);
            }
            let _ = InvalidateRect(hwnd, None, true);
            LRESULT(0)
        }
        WM_VSCROLL => {
            if let Some(command) = scrollbar_command(wparam) {
                scroll(hwnd, command);
            }
            LRESULT(0)
        }
        WM_MOUSEWHEEL => {
            scroll(hwnd, ScrollCommand::Wheel(wheel_delta(wparam)));
            LRESULT(0)
        }
        // The whole client area is repainted in WM_PAINT.
        WM_ERASEBKGND => LRESULT(1),
        WM_DESTROY => {
            PostQuitMessage(0);
            LRESULT(0)
        }
        WM_NCDESTROY => {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Maps a `WM_VSCROLL` request to a scroll command.  Page requests and
/// `SB_ENDSCROLL` are ignored.
fn scrollbar_command(wparam: WPARAM) -> Option<ScrollCommand> {
    let request = SCROLLBAR_COMMAND((wparam.0 & 0xFFFF) as _);
    match request {
        SB_LINEUP => Some(ScrollCommand::LineUp),
        SB_LINEDOWN => Some(ScrollCommand::LineDown),
        SB_THUMBPOSITION | SB_THUMBTRACK => {
            Some(ScrollCommand::ThumbTo(((wparam.0 >> 16) & 0xFFFF) as i32))
        }
        _ => None,
    }
}

/// Signed wheel rotation from the high word of `wparam`.
fn wheel_delta(wparam: WPARAM) -> i32 {
    i32::from(((wparam.0 >> 16) & 0xFFFF) as u16 as i16)
}

unsafe fn scroll(hwnd: HWND, command: ScrollCommand) {
    let scrollbar = match context(hwnd) {
        Some(ctx) if ctx.state.scroll(command) => ctx.state.scrollbar(),
        _ => return,
    };
    set_scrollbar(hwnd, scrollbar);
    let _ = InvalidateRect(hwnd, None, true);
}

unsafe fn set_scrollbar(hwnd: HWND, scrollbar: ScrollbarModel) {
    let info = SCROLLINFO {
        cbSize: std::mem::size_of::<SCROLLINFO>() as u32,
        fMask: SIF_RANGE | SIF_PAGE | SIF_POS,
        nMin: 0,
        nMax: scrollbar.range_max,
        nPage: scrollbar.page,
        nPos: scrollbar.position,
        nTrackPos: 0,
    };
    SetScrollInfo(hwnd, SB_VERT, &info, true);
}

unsafe fn paint(hwnd: HWND) {
    let mut ps = PAINTSTRUCT::default();
    let hdc = BeginPaint(hwnd, &mut ps);

    let mut client = RECT::default();
    let _ = GetClientRect(hwnd, &mut client);
    FillRect(hdc, &client, GetSysColorBrush(COLOR_WINDOW));

    if let Some(ctx) = context(hwnd) {
        draw_frame(hdc, ctx);
    }

    let _ = EndPaint(hwnd, &ps);
}

unsafe fn draw_frame(hdc: HDC, ctx: &WindowContext) {
    SetBkMode(hdc, TRANSPARENT);

    for geometry in ctx.state.frame() {
        FillRect(hdc, &to_win32(geometry.track), ctx.track_brush.0);
        if let Some(brush) = ctx.bar_brushes.get(geometry.index) {
            FillRect(hdc, &to_win32(geometry.fill), brush.0);
        }

        let title: Vec<u16> = geometry.title.encode_utf16().collect();
        let (x, y) = geometry.title_origin;
        let _ = TextOutW(hdc, x, y, &title);

        let label: Vec<u16> = geometry.label.encode_utf16().collect();
        let mut extent = SIZE::default();
        let _ = GetTextExtentPoint32W(hdc, &label, &mut extent);
        let (x, y) = geometry.track.centered_origin(extent.cx, extent.cy);
        let _ = TextOutW(hdc, x, y, &label);
    }
}

fn to_win32(rect: Rect) -> RECT {
    RECT {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

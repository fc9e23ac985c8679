//! The "brain" example patch.
//!
//! Listens for OSC on UDP port 8000 and routes three control messages:
//! `/hello <id> <type>`, `/param <id> ...` and `/goodbye <id>`. A hello for
//! an oscillator fires a message box that creates an `osc~` inside the
//! `voices` subpatch at runtime and wires it to the gain stage.

use crate::graph::{Patch, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// UDP port the patch listens on.
pub const OSC_PORT: u16 = 8000;

/// Builds the `voices` subpatch: a gain stage feeding an amplitude follower
/// and a printer so signal flow can be observed on stderr.
///
/// Index 0 is `namecanvas`, so the first object created at runtime lands on
/// index 4 and the gain stage sits at index 1.
pub fn voices_patch() -> Patch {
    let mut voices = Patch::new();
    voices.obj(50, 50, ["namecanvas", "voices"]);
    let vol = voices.obj(50, 200, ["*~", "0.3"]);
    let env = voices.obj(50, 250, ["env~"]);
    let print = voices.obj(50, 300, ["print", "signal-level"]);
    voices.connect_first(vol, env);
    voices.connect_first(env, print);
    voices
}

/// Builds the brain patch on a canvas of the given size.
pub fn brain_patch_sized(width: u32, height: u32) -> Patch {
    let mut p = Patch::with_size(width, height);

    p.text(20, 20, "=== PURE DATA PHYSICAL - BRAIN ===");
    p.text(20, 45, "Dynamic module instantiation");

    p.subpatch(600, 100, "voices", voices_patch());

    // OSC receive chain
    let port = OSC_PORT.to_string();
    let net = p.obj(50, 100, ["netreceive", "-u", "-b", port.as_str()]);
    let osc = p.obj(50, 130, ["oscparse"]);
    let trim = p.obj(50, 160, ["list", "trim"]);
    let route = p.obj(50, 190, ["route", "hello", "param", "goodbye"]);

    p.connect_first(net, osc);
    p.connect_first(osc, trim);
    p.connect_first(trim, route);

    let hello_print = p.obj(50, 240, ["print", "hello-raw"]);
    let unpack = p.obj(50, 280, ["unpack", "s", "s"]);

    p.connect(route, 0, hello_print, 0);
    p.connect(route, 0, unpack, 0);

    p.obj(180, 280, ["print", "module-id"]);
    p.obj(180, 320, ["print", "type"]);

    let param_print = p.obj(200, 240, ["print", "param"]);
    let goodbye_print = p.obj(350, 240, ["print", "goodbye"]);

    p.connect(route, 1, param_print, 0);
    p.connect(route, 2, goodbye_print, 0);

    p.text(20, 360, "=== TYPE ROUTING ===");
    let sel = p.obj(50, 400, ["select", "oscillator", "filter"]);
    let osc_print = p.obj(200, 440, ["print", "got-oscillator"]);

    p.connect(unpack, 1, sel, 0);
    p.connect(sel, 0, osc_print, 0);

    // voices: 0=namecanvas 1=*~ 2=env~ 3=print, so the new osc~ is 4
    let trig = p.obj(50, 480, ["t", "b"]);
    let create = p.msg(
        50,
        520,
        "; voices obj 200 100 osc~ 440 ; voices connect 4 0 1 0 ; pd dsp 1 ;;",
    );
    p.obj(50, 560, ["print", "triggered-create"]);

    p.connect(sel, 0, trig, 0);
    p.connect(trig, 0, create, 0);

    // the message box sends to receivers, not its outlet
    let bang_print = p.obj(200, 480, ["print", "create-triggered"]);
    p.connect(trig, 0, bang_print, 0);

    p
}

/// Builds the brain patch on the default 900x800 canvas.
pub fn brain_patch() -> Patch {
    brain_patch_sized(DEFAULT_WIDTH, DEFAULT_HEIGHT)
}

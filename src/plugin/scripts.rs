//! Embedded Helper Scripts
//!
//! The Tk and tkinter slider plugins shipped as text constants, plus
//! interpreter discovery. The scripts are opaque external programs as far
//! as this crate is concerned: they receive the current parameter snapshot
//! as argv and speak the control protocol on stdout.

use std::path::Path;

use tracing::debug;

use crate::config::PluginsConfig;

use super::channel::{LaunchSpec, PluginKind};

/// Build the launch spec for a plugin kind from the configured
/// interpreter candidates.
pub fn spec_for(kind: PluginKind, config: &PluginsConfig) -> LaunchSpec {
    match kind {
        PluginKind::Tk => LaunchSpec {
            command: find_interpreter(&config.tclsh_candidates, "tclsh"),
            script: TK_SLIDER_SCRIPT.to_string(),
            suffix: ".tcl".to_string(),
        },
        PluginKind::Tkinter => LaunchSpec {
            command: find_interpreter(&config.python_candidates, "python3"),
            script: TKINTER_SLIDER_SCRIPT.to_string(),
            suffix: ".py".to_string(),
        },
    }
}

/// Pick the first candidate path that exists as a file; otherwise fall
/// back to the bare command name and let PATH resolution decide at spawn.
fn find_interpreter(candidates: &[String], fallback: &str) -> String {
    for candidate in candidates {
        if Path::new(candidate).is_file() {
            debug!(interpreter = %candidate, "interpreter candidate found");
            return candidate.clone();
        }
    }
    fallback.to_string()
}

/// Tcl/Tk slider window mirroring the graph controls
pub const TK_SLIDER_SCRIPT: &str = r#"
package require Tk

lassign $argv init_a init_b init_delta init_A init_B

wm title . "Lissacon Tk Plugin"

foreach {name label from to res init} [list \
    a      "Freq a"  1.0  10.0   1.0   $init_a \
    b      "Freq b"  1.0  10.0   1.0   $init_b \
    delta  "Phase"   0.0  6.2832 0.01  $init_delta \
    A      "Amp A"   0.1  2.0    0.05  $init_A \
    B      "Amp B"   0.1  2.0    0.05  $init_B \
] {
    set f [ttk::frame .f_$name]
    ttk::label $f.l -text $label -width 8
    scale $f.s -from $from -to $to -resolution $res \
        -orient horizontal -length 280 \
        -command [list on_slider $name]
    $f.s set $init
    pack $f.l $f.s -side left -padx 5
    pack $f -fill x -padx 10 -pady 3
}

set bf [ttk::frame .presets]
foreach preset {circle figure8 lissajous star bowtie} {
    ttk::button $bf.$preset -text $preset \
        -command [list on_preset $preset]
    pack $bf.$preset -side left -padx 3
}
pack $bf -pady 10

proc on_slider {name value} {
    puts "SET $name $value"
    flush stdout
}

array set preset_data {
    circle    {a 1 b 1 delta 1.5708 A 1 B 1}
    figure8   {a 1 b 2 delta 0      A 1 B 1}
    lissajous {a 3 b 2 delta 1.5708 A 1 B 1}
    star      {a 5 b 6 delta 1.5708 A 1 B 1}
    bowtie    {a 2 b 3 delta 0.7854 A 1 B 1}
}

proc on_preset {name} {
    global preset_data
    puts "PRESET $name"
    flush stdout
    foreach {param val} $preset_data($name) {
        .f_$param.s set $val
    }
}
"#;

/// Python/tkinter slider window mirroring the graph controls
pub const TKINTER_SLIDER_SCRIPT: &str = r#"
import sys, tkinter as tk
from tkinter import ttk

init_a, init_b, init_delta, init_A, init_B = (float(x) for x in sys.argv[1:6])

root = tk.Tk()
root.title("Lissacon Tkinter Plugin")

sliders = {}
for name, label, lo, hi, res, init in [
    ('a',     'Freq a', 1,   10,   1,    init_a),
    ('b',     'Freq b', 1,   10,   1,    init_b),
    ('delta', 'Phase',  0.0, 6.28, 0.01, init_delta),
    ('A',     'Amp A',  0.1, 2.0,  0.05, init_A),
    ('B',     'Amp B',  0.1, 2.0,  0.05, init_B),
]:
    f = ttk.Frame(root)
    ttk.Label(f, text=label, width=8).pack(side='left', padx=5)
    s = tk.Scale(f, from_=lo, to=hi, resolution=res,
                 orient='horizontal', length=280,
                 command=lambda v, n=name: on_slider(n, v))
    s.set(init)
    s.pack(side='left', padx=5)
    f.pack(fill='x', padx=10, pady=3)
    sliders[name] = s

presets = {
    'circle':    {'a': 1, 'b': 1, 'delta': 1.5708, 'A': 1, 'B': 1},
    'figure8':   {'a': 1, 'b': 2, 'delta': 0,      'A': 1, 'B': 1},
    'lissajous': {'a': 3, 'b': 2, 'delta': 1.5708, 'A': 1, 'B': 1},
    'star':      {'a': 5, 'b': 6, 'delta': 1.5708, 'A': 1, 'B': 1},
    'bowtie':    {'a': 2, 'b': 3, 'delta': 0.7854, 'A': 1, 'B': 1},
}

def on_slider(name, value):
    print(f"SET {name} {value}", flush=True)

def on_preset(name):
    print(f"PRESET {name}", flush=True)
    for param, val in presets[name].items():
        sliders[param].set(val)

bf = ttk.Frame(root)
for p in ['circle', 'figure8', 'lissajous', 'star', 'bowtie']:
    ttk.Button(bf, text=p, command=lambda x=p: on_preset(x)).pack(side='left', padx=3)
bf.pack(pady=10)

root.mainloop()
"#;

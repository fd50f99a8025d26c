use fatigue::grow::elements::default_elements;
use fatigue::material::{self, Material};

static UNITS: &str =
"The built-in material parameters relate dK in MPa sqrt(m) to da/dN in
m/cycle. Stresses should therefore be given in MPa and crack lengths in
metres. The structural checks work in SI units throughout: metres,
newtons, kilograms and seconds.
";

/// One line of the material table, with the crack length units of
/// the growth rate.
fn material_row(mat: &Material) -> String {
    let mut row = format!("{:20} {:35} {:5} ", mat.name, mat.cite, mat.units);
    for (label, value) in &mat.params {
        if (*value).abs() < 1.0 {
            row.push_str(&format!("{}={:e} ", label, value));
        } else {
            row.push_str(&format!("{}={} ", label, value));
        }
    }
    row.trim_end().to_string()
}

/// Prints out lists of data. Sort of an extended help.
pub fn print_list() {
    let analyses = [
        ("grow", "grow a crack in each member until failure or the cycle limit (default)"),
        ("reactions", "support reactions of the triangular frame"),
        ("beam", "shear force and bending moment along a uniformly loaded beam"),
        ("dynamics", "single degree of freedom response to a harmonic wave force"),
        ("frame", "plane frame analysis of the two member test frame"),
        ("sketch", "isometric svg drawing of the support structure"),
    ];

    let formats = [
        (
            "Member stresses",
"Members are given with --element as a name and a comma separated list of
observed peak stresses. The mean of the stresses is used as the peak stress
of a constant amplitude cycle:

    --element Pile=192,226,257,318

Repeat the option for each member. Any --element replaces all the built-in
members.
",
        ),
        (
            "Parameters",
"Paris law parameters are given with --parameters as label=value pairs:

    --parameters c=1.08e-12,m=3.5
",
        ),
    ];

    let mut header = Counter::new();

    header.section("Analyses");
    for &(name, description) in &analyses {
        println!("{:12} {}", name, description);
    }

    header.section("Units");
    println!("{}", UNITS);

    header.section("Materials");
    println!("{:20} {:35} {:5} Coefficients", "Name", "Description", "Units");
    for mat in material::all_materials() {
        println!("{}", material_row(mat));
    }

    header.section("Built-in members");
    for element in default_elements() {
        let stresses = element
            .stresses
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!("{:22} {}", element.name, stresses);
    }

    header.section("Input formats");
    for &(name, form) in &formats {
        header.subsection(name);
        println!("{}", form);
    }

    println!();
}

struct Counter {
    section: usize,
    subsection: usize,
}

impl Counter {
    fn new() -> Counter {
        Counter {
            section: 0,
            subsection: 0,
        }
    }

    // print as a numbered, underlined header
    fn section(&mut self, head: &str) {
        self.section += 1;
        self.subsection = 0;
        let header = format!("{}. {}", self.section, head);
        println!("\n{}", header);
        println!("{}\n", "=".repeat(header.len()));
    }

    fn subsection(&mut self, head: &str) {
        self.subsection += 1;
        let header = format!("{}.{}. {}", self.section, self.subsection, head);
        println!("{}", header);
        println!("{}\n", "-".repeat(header.len()));
    }
}

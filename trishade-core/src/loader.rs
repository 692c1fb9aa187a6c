/// Line-oriented mesh description parser
///
/// The format is a small subset of Wavefront OBJ:
///
/// ```text
/// o <name>
/// v <x> <y> <z>
/// vn <x> <y> <z>
/// f <v0>/<t>/<n0> <v1>/<t>/<n> <v2>/<t>/<n>
/// ```
///
/// Every `o` line opens a new mesh and the geometry lines that follow are
/// appended to it. Faces carry one normal, the one paired with their first
/// corner; the normal slots of the other two corners are read but dropped.
/// Indices are 1-based in the file and 0-based once loaded.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use nalgebra::Vector3;
use nom::{
    character::complete::{char, i64 as int, multispace0},
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::error::{Element, LoadError, ParseError, ParseErrorKind, Result};
use crate::geometry::{Mesh, Triangle};

/// Read every mesh declared in the file at `path`, in declaration order
pub fn load_meshes(path: impl AsRef<Path>) -> Result<Vec<Mesh>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loading mesh: {}", path.display());
    parse_meshes(BufReader::new(file), &path.display().to_string())
}

/// Parse a mesh description from any buffered reader
///
/// `source_name` only shows up in log lines and errors.
/// Lines are decoded lossily, bytes that aren't UTF-8 never fail the load.
pub fn parse_meshes<R: BufRead>(mut reader: R, source_name: &str) -> Result<Vec<Mesh>> {
    let mut loader = MeshLoader::new(source_name);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoadError::Read {
                path: PathBuf::from(source_name),
                source,
            })?;
        if read == 0 {
            break;
        }

        let text = String::from_utf8_lossy(&buf);
        let line: &str = &text;
        loader
            .feed_line(line.strip_suffix('\n').unwrap_or(line))
            .map_err(|error| LoadError::Parse {
                source_name: source_name.to_owned(),
                error,
            })?;
    }

    Ok(loader.finish())
}

/// Path of mesh `name` inside `resources_dir`, unless `name` already exists as given
pub fn resolve_mesh_path(resources_dir: impl AsRef<Path>, name: impl AsRef<Path>) -> PathBuf {
    let name = name.as_ref();
    if name.is_absolute() || name.exists() {
        name.to_path_buf()
    } else {
        resources_dir.as_ref().join(name)
    }
}

/// Incremental parser state
///
/// Feed it one line at a time and call [`MeshLoader::finish`] for the meshes.
#[derive(Debug)]
pub struct MeshLoader<'a> {
    source_name: &'a str,
    meshes: Vec<Mesh>,
    current: Option<usize>,
    line: usize,
}

impl<'a> MeshLoader<'a> {
    pub fn new(source_name: &'a str) -> Self {
        Self {
            source_name,
            meshes: Vec::new(),
            current: None,
            line: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line
    }

    pub fn feed_line(&mut self, line: &str) -> std::result::Result<(), ParseError> {
        self.line += 1;
        let line = line.trim_end_matches('\r');

        let mut chars = line.chars();
        let Some(prefix) = chars.next() else {
            return Ok(());
        };

        match prefix {
            '#' => {}
            // material library, material use, line element, smoothing group
            'm' | 'u' | 'l' | 's' => {}
            'o' => self.begin_object(line[1..].trim())?,
            'v' => {
                let line_number = self.line;
                let source_name = self.source_name;
                let element = match chars.next() {
                    Some(' ') => Element::Vertex,
                    Some('n') => Element::Normal,
                    _ => Element::Other,
                };
                let mesh = self.active_mesh(element)?;
                match element {
                    Element::Vertex => {
                        let position = scan_vector(&line[1..], element, line_number)?;
                        push(&mut mesh.vertices, position, line_number)?;
                    }
                    Element::Normal => {
                        let normal = scan_vector(&line[2..], element, line_number)?;
                        push(&mut mesh.normals, normal, line_number)?;
                    }
                    _ => warn!(
                        "Unrecognised vertex element {:?} in '{}' : line {}",
                        line, source_name, line_number
                    ),
                }
            }
            'f' => {
                let line_number = self.line;
                let mesh = self.active_mesh(Element::Face)?;
                let face = scan_face(&line[1..], line_number)?;
                push(&mut mesh.faces, face, line_number)?;
            }
            _ => warn!(
                "Unrecognised element {:?} in '{}' : line {}",
                line, self.source_name, self.line
            ),
        }

        Ok(())
    }

    /// Stop parsing and hand over the meshes in declaration order
    pub fn finish(self) -> Vec<Mesh> {
        for (index, mesh) in self.meshes.iter().enumerate() {
            info!(
                "Mesh {} ({}) from '{}' ({} lines): {} vertices, {} normals, {} faces",
                index,
                mesh.name.as_deref().unwrap_or("unnamed"),
                self.source_name,
                self.lines_read(),
                mesh.vertex_count(),
                mesh.normal_count(),
                mesh.face_count(),
            );
        }
        self.meshes
    }

    fn begin_object(&mut self, name: &str) -> std::result::Result<(), ParseError> {
        let mesh = if name.is_empty() {
            Mesh::new()
        } else {
            Mesh::named(name)
        };
        push(&mut self.meshes, mesh, self.line)?;
        self.current = Some(self.meshes.len() - 1);
        debug!("Object {:?} declared at line {}", name, self.line);
        Ok(())
    }

    fn active_mesh(&mut self, element: Element) -> std::result::Result<&mut Mesh, ParseError> {
        let line = self.line;
        self.current
            .and_then(|index| self.meshes.get_mut(index))
            .ok_or(ParseError {
                line,
                kind: ParseErrorKind::NoActiveMesh { element },
            })
    }
}

/// Append with a fallible allocation instead of aborting on exhaustion
fn push<T>(items: &mut Vec<T>, item: T, line: usize) -> std::result::Result<(), ParseError> {
    items.try_reserve(1).map_err(|_| ParseError {
        line,
        kind: ParseErrorKind::Allocation,
    })?;
    items.push(item);
    Ok(())
}

fn float_field(input: &str) -> IResult<&str, f64> {
    preceded(multispace0, double)(input)
}

fn int_field(input: &str) -> IResult<&str, i64> {
    preceded(multispace0, int)(input)
}

fn slash(input: &str) -> IResult<&str, char> {
    char('/')(input)
}

/// Match fields left to right, stopping at the first one that doesn't parse
///
/// Anything after the last wanted field is ignored.
fn scan_floats(mut input: &str, wanted: usize) -> Vec<f64> {
    let mut fields = Vec::with_capacity(wanted);
    while fields.len() < wanted {
        match float_field(input) {
            Ok((rest, value)) => {
                fields.push(value);
                input = rest;
            }
            Err(_) => break,
        }
    }
    fields
}

fn scan_vector(
    input: &str,
    element: Element,
    line: usize,
) -> std::result::Result<Vector3<f64>, ParseError> {
    let fields = scan_floats(input, 3);
    match *fields.as_slice() {
        [x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(ParseError {
            line,
            kind: ParseErrorKind::FieldCount {
                element,
                found: fields.len(),
                expected: 3,
            },
        }),
    }
}

#[derive(Debug, Clone, Copy)]
enum FaceToken {
    /// An index that is kept
    Index,
    /// An index that must be present but is dropped
    Skip,
    Slash,
}

use FaceToken::{Index, Skip, Slash};

/// `v0/_/n0 v1/_/_ v2/_/_`
const FACE_PATTERN: [FaceToken; 15] = [
    Index, Slash, Skip, Slash, Index, //
    Index, Slash, Skip, Slash, Skip, //
    Index, Slash, Skip, Slash, Skip,
];

/// Captured indices in the order v0, n0, v1, v2
fn scan_face_indices(mut input: &str) -> Vec<i64> {
    let mut captured = Vec::with_capacity(4);
    for token in FACE_PATTERN {
        let step = match token {
            Index => int_field(input).map(|(rest, value)| {
                captured.push(value);
                rest
            }),
            Skip => int_field(input).map(|(rest, _)| rest),
            Slash => slash(input).map(|(rest, _)| rest),
        };
        match step {
            Ok(rest) => input = rest,
            Err(_) => break,
        }
    }
    captured
}

fn scan_face(input: &str, line: usize) -> std::result::Result<Triangle, ParseError> {
    let captured = scan_face_indices(input);
    let [v0, n0, v1, v2] = *captured.as_slice() else {
        return Err(ParseError {
            line,
            kind: ParseErrorKind::FieldCount {
                element: Element::Face,
                found: captured.len(),
                expected: 4,
            },
        });
    };

    let zero_based = |index: i64| {
        index
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .ok_or(ParseError {
                line,
                kind: ParseErrorKind::InvalidIndex { index },
            })
    };

    Ok(Triangle {
        v0: zero_based(v0)?,
        v1: zero_based(v1)?,
        v2: zero_based(v2)?,
        n0: zero_based(n0)?,
    })
}

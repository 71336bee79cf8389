use crate::bounds::Rectangle;
use crate::index::SpatialIndex;
use crate::kdtree::KdTree;
use crate::point::{Axis, Point};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

fn to_js_err<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn flatten(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x(), p.y()]).collect()
}

fn unflatten(coords: &[f64]) -> Result<Vec<Point>, JsValue> {
    if coords.len() % 2 != 0 {
        return Err(JsValue::from_str("expected a flat [x, y, x, y, ...] array"));
    }
    coords
        .chunks_exact(2)
        .map(|c| Point::try_new(c[0], c[1]).map_err(to_js_err))
        .collect()
}

// --- Bounding Box ---

/// Axis-aligned rectangle passed in from JavaScript.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct Rect2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen]
impl Rect2D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rect2D {
        Rect2D { min_x, min_y, max_x, max_y }
    }
}

impl TryFrom<Rect2D> for Rectangle {
    type Error = JsValue;

    fn try_from(r: Rect2D) -> Result<Self, Self::Error> {
        Rectangle::try_new(r.min_x, r.min_y, r.max_x, r.max_y).map_err(to_js_err)
    }
}

// --- Tree ---

/// WASM wrapper for the 2-d tree. Points cross the boundary as flat `[x, y, ...]` arrays.
#[wasm_bindgen]
pub struct KdTree2D {
    inner: KdTree,
}

#[wasm_bindgen]
impl KdTree2D {
    #[wasm_bindgen(constructor)]
    pub fn new(domain: Rect2D) -> Result<KdTree2D, JsValue> {
        Ok(KdTree2D { inner: KdTree::new(domain.try_into()?) })
    }

    pub fn insert(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        let p = Point::try_new(x, y).map_err(to_js_err)?;
        Ok(self.inner.insert(p))
    }

    /// Inserts a flat `[x, y, ...]` array, returning the number of new points.
    pub fn insert_points(&mut self, coords: &[f64]) -> Result<usize, JsValue> {
        let before = self.inner.size();
        self.inner.extend(unflatten(coords)?);
        Ok(self.inner.size() - before)
    }

    /// Inserts `count` uniform random points inside the domain.
    pub fn random_points(&mut self, count: usize) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let points = self.inner.domain().random_points(&mut rng, count);
        self.inner.extend(points);
    }

    pub fn contains(&self, x: f64, y: f64) -> Result<bool, JsValue> {
        let p = Point::try_new(x, y).map_err(to_js_err)?;
        Ok(self.inner.contains(&p))
    }

    pub fn range(&self, rect: Rect2D) -> Result<Vec<f64>, JsValue> {
        let rect: Rectangle = rect.try_into()?;
        Ok(flatten(&self.inner.range(&rect)))
    }

    pub fn nearest(&self, x: f64, y: f64) -> Result<Option<Vec<f64>>, JsValue> {
        let p = Point::try_new(x, y).map_err(to_js_err)?;
        Ok(self.inner.nearest(&p).map(|n| vec![n.x(), n.y()]))
    }

    /// Nearest points for a flat array of queries, computed in parallel.
    /// Returns `undefined` when the tree is empty, since no query has an answer.
    pub fn nearest_many(&self, coords: &[f64]) -> Result<Option<Vec<f64>>, JsValue> {
        let queries = unflatten(coords)?;
        if self.inner.is_empty() {
            return Ok(None);
        }
        let found: Vec<Point> = self.inner.nearest_many(&queries).into_iter().flatten().collect();
        Ok(Some(flatten(&found)))
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// All stored points as a flat array, in insertion order.
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> {
        self.inner.iter().flat_map(|p| [p.x(), p.y()]).collect()
    }

    /// Splitting segments as a flat `[x0, y0, x1, y1, ...]` array, one segment per node.
    pub fn split_lines(&self) -> Vec<f64> {
        self.inner
            .partitions()
            .iter()
            .flat_map(|part| match part.axis {
                Axis::Vertical => {
                    [part.point.x(), part.rect.ymin(), part.point.x(), part.rect.ymax()]
                }
                Axis::Horizontal => {
                    [part.rect.xmin(), part.point.y(), part.rect.xmax(), part.point.y()]
                }
            })
            .collect()
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}

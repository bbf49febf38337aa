use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, Pat, PatType, Type};

fn formatted_arity_error_msg(expected: usize) -> String {
    format!("expected {} arguments, got {{}}", expected)
}

fn is_f64(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path) if type_path.qself.is_none() && type_path.path.is_ident("f64"))
}

/// Turns `fn name(a: f64, b: f64, ..) -> Result<f64, EvaluationError>` into
/// `fn name(args: &[f64]) -> Result<f64, EvaluationError>`, the shape
/// `OperatorRegistry::register_function` accepts. The generated function
/// rejects a slice of the wrong length with `EvaluationError::FunctionFailed`.
#[proc_macro_attribute]
pub fn formula_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    let attrs = &input.attrs;
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_output = &input.sig.output;
    let fn_body = &input.block;
    let display_name = fn_name.to_string().to_uppercase();

    let mut arg_extractions = Vec::new();

    for (i, arg) in input.sig.inputs.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return Err(syn::Error::new_spanned(
                arg,
                "formula functions cannot take `self`",
            ));
        };
        let Pat::Ident(pat_ident) = &**pat else {
            return Err(syn::Error::new_spanned(
                pat,
                "formula function arguments must be plain identifiers",
            ));
        };
        if !is_f64(ty) {
            return Err(syn::Error::new_spanned(
                ty,
                "formula function arguments must be f64",
            ));
        }

        let arg_name = &pat_ident.ident;
        let mutability = &pat_ident.mutability;
        arg_extractions.push(quote! {
            let #mutability #arg_name: f64 = args[#i];
        });
    }

    let args_len = arg_extractions.len();
    let err_msg = formatted_arity_error_msg(args_len);

    Ok(quote! {
        #(#attrs)*
        #vis fn #fn_name(args: &[f64]) #fn_output {
            if args.len() != #args_len {
                return Err(::calcpro::EvaluationError::FunctionFailed {
                    name: #display_name.to_string(),
                    reason: format!(#err_msg, args.len()),
                });
            }

            #(#arg_extractions)*

            #fn_body
        }
    })
}
